use crate::config::SimulationConfig;
use crate::graph::edge::EdgeId;
use crate::graph::network::NetworkState;
use crate::simulation::modifiers::Outage;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeEvent {
    Fail,
    Restore,
    SetCapacity(f64),
}

/// Source of per-timestep capacity perturbations.
pub trait Disturbance {
    fn name(&self) -> &str;
    fn events(&mut self, turn: usize, network: &NetworkState) -> Vec<(EdgeId, EdgeEvent)>;
}

/// Seeded random failures with timed repair, plus optional capacity jitter.
pub struct RandomDisturbance {
    rng: StdRng,
    failure_probability: f64,
    capacity_jitter: f64,
    repair_turns: u32,
    outages: Vec<Outage>,
}

impl RandomDisturbance {
    pub fn new(seed: u64, failure_probability: f64, repair_turns: u32, capacity_jitter: f64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            failure_probability: unit_rate(failure_probability),
            capacity_jitter: unit_rate(capacity_jitter),
            repair_turns,
            outages: Vec::new(),
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(
            config.seed,
            config.failure_probability,
            config.repair_turns,
            config.capacity_jitter,
        )
    }

    pub fn outage(&self, edge: EdgeId) -> Option<&Outage> {
        self.outages.get(edge.index())
    }
}

/// Clamps into `[0, 1]`; NaN counts as zero.
fn unit_rate(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}

impl Disturbance for RandomDisturbance {
    fn name(&self) -> &str {
        "random"
    }

    fn events(&mut self, _turn: usize, network: &NetworkState) -> Vec<(EdgeId, EdgeEvent)> {
        if self.outages.len() < network.edges().len() {
            self.outages
                .resize(network.edges().len(), Outage::new(self.repair_turns));
        }
        let mut events = Vec::new();

        for edge in network.edges() {
            let outage = &mut self.outages[edge.id().index()];
            // brought back early, or taken over by an explicit disable
            if outage.is_active() && (!edge.is_failed() || edge.is_disabled()) {
                outage.cancel();
            }
            if edge.is_failed() || outage.is_active() {
                continue;
            }
            if self.rng.gen_bool(self.failure_probability) {
                outage.start();
                events.push((edge.id(), EdgeEvent::Fail));
            } else if self.capacity_jitter > 0.0 {
                let factor = 1.0 + self.rng.gen_range(-self.capacity_jitter..=self.capacity_jitter);
                events.push((edge.id(), EdgeEvent::SetCapacity(edge.base_capacity() * factor)));
            }
        }

        self.outages
            .iter_mut()
            .enumerate()
            .filter_map(|(i, outage)| outage.tick().then_some(EdgeId(i)))
            .for_each(|id| events.push((id, EdgeEvent::Restore)));

        events
    }
}

/// Replays a fixed `(turn, edge, event)` list.
pub struct ScriptedDisturbance {
    script: Vec<(usize, String, EdgeEvent)>,
}

impl ScriptedDisturbance {
    pub fn new(script: Vec<(usize, String, EdgeEvent)>) -> Self {
        Self { script }
    }
}

impl Disturbance for ScriptedDisturbance {
    fn name(&self) -> &str {
        "scripted"
    }

    fn events(&mut self, turn: usize, network: &NetworkState) -> Vec<(EdgeId, EdgeEvent)> {
        self.script
            .iter()
            .filter(|(t, _, _)| *t == turn)
            .filter_map(|(_, edge, event)| match network.edge_id(edge) {
                Some(id) => Some((id, *event)),
                None => {
                    warn!(turn, edge = %edge, "scripted event for unknown edge ignored");
                    None
                }
            })
            .collect()
    }
}
