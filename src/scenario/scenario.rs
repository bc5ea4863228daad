use crate::analysis::enumerator::EnumerationLimits;
use crate::error::BuildError;
use crate::graph::network::NetworkState;
use crate::scenario::basic::Sample;
use crate::scenario::random::RandomScenario;
use crate::scenario::stress::{GridScenario, LayeredScenario, StarScenario};

/// A named recipe for a network. Limits apply only to scenarios that
/// enumerate their paths.
pub trait Scenario {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn build(&self, limits: EnumerationLimits) -> Result<NetworkState, BuildError>;
}

/// Every sample, fixed ones first. Generated ones draw capacities from `seed`.
pub fn catalog(seed: u64) -> Vec<Box<dyn Scenario>> {
    let mut scenarios: Vec<Box<dyn Scenario>> = Sample::ALL
        .iter()
        .map(|s| Box::new(*s) as Box<dyn Scenario>)
        .collect();
    scenarios.push(Box::new(GridScenario::new(3, 3, seed)));
    scenarios.push(Box::new(StarScenario::new(5, seed)));
    scenarios.push(Box::new(LayeredScenario::new(vec![1, 3, 2, 1], seed)));
    scenarios.push(Box::new(RandomScenario::new(10, 20, seed)));
    scenarios
}

pub fn by_name(name: &str, seed: u64) -> Option<Box<dyn Scenario>> {
    catalog(seed).into_iter().find(|s| s.name() == name)
}
