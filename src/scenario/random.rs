use crate::analysis::enumerator::EnumerationLimits;
use crate::error::BuildError;
use crate::graph::builder::NetworkBuilder;
use crate::graph::network::NetworkState;
use crate::scenario::scenario::Scenario;
use crate::scenario::stress::capacity;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

const MIN_CAPACITY: f64 = 2.0;
const MAX_CAPACITY: f64 = 15.0;
const CHAIN_HOPS: usize = 3;

/// Random directed network that always has at least one s-t route.
pub struct RandomScenario {
    nodes: usize,
    edges: usize,
    seed: u64,
}

impl RandomScenario {
    /// `nodes` counts s and t.
    pub fn new(nodes: usize, edges: usize, seed: u64) -> Self {
        Self {
            nodes: nodes.max(2),
            edges,
            seed,
        }
    }

    fn node_names(&self) -> Vec<String> {
        let mut names = vec!["s".to_string()];
        names.extend((1..self.nodes - 1).map(|i| format!("v{}", i)));
        names.push("t".to_string());
        names
    }
}

impl Scenario for RandomScenario {
    fn name(&self) -> &str {
        "random"
    }

    fn description(&self) -> &str {
        "Seeded random topology with a guaranteed s-t chain"
    }

    fn build(&self, limits: EnumerationLimits) -> Result<NetworkState, BuildError> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let names = self.node_names();
        let (source, sink) = (0, names.len() - 1);

        let mut builder = NetworkBuilder::new().source(&names[source]).sink(&names[sink]);
        for name in &names[1..sink] {
            builder = builder.intermediate(name);
        }

        // s → a few shuffled intermediates → t
        let mut middle = (1..sink).collect::<Vec<_>>();
        middle.shuffle(&mut rng);
        middle.truncate(CHAIN_HOPS);
        let mut chain = vec![source];
        chain.extend(middle);
        chain.push(sink);
        let mut pairs = chain.windows(2).map(|w| (w[0], w[1])).collect::<Vec<_>>();

        let mut candidates = (0..names.len())
            .filter(|from| *from != sink)
            .flat_map(|from| (0..names.len()).map(move |to| (from, to)))
            .filter(|(from, to)| *to != source && from != to && !pairs.contains(&(*from, *to)))
            .collect::<Vec<_>>();
        candidates.shuffle(&mut rng);
        let extra = self.edges.saturating_sub(pairs.len());
        pairs.extend(candidates.into_iter().take(extra));

        for (i, (from, to)) in pairs.iter().enumerate() {
            let cap = capacity(&mut rng, MIN_CAPACITY, MAX_CAPACITY);
            builder = builder.edge(&format!("e{}", i), &names[*from], &names[*to], cap);
        }
        builder.enumerate_paths(limits).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_requested_shape() {
        let n = RandomScenario::new(10, 20, 42)
            .build(EnumerationLimits::new(None, Some(1000)))
            .unwrap();
        assert_eq!(10, n.node_count());
        assert_eq!(20, n.edges().len());
        assert!(!n.paths().is_empty());
    }

    #[test]
    fn test_no_self_loops_or_duplicates() {
        let n = RandomScenario::new(6, 100, 9)
            .build(EnumerationLimits::unbounded())
            .unwrap();
        let source = n.source().unwrap();
        let sink = n.sink().unwrap();
        let mut seen = HashSet::new();
        for edge in n.edges() {
            assert_ne!(edge.from(), edge.to());
            assert_ne!(sink, edge.from());
            assert_ne!(source, edge.to());
            assert!(seen.insert((edge.from(), edge.to())));
        }
        // capped at every allowed pair: 5 * 5 minus 4 self-loops
        assert_eq!(21, n.edges().len());
    }

    #[test]
    fn test_sparse_request_still_connects() {
        let n = RandomScenario::new(8, 0, 5)
            .build(EnumerationLimits::unbounded())
            .unwrap();
        assert_eq!(4, n.edges().len());
        assert_eq!(1, n.paths().len());
    }

    #[test]
    fn test_seeded() {
        let build = |seed| {
            RandomScenario::new(10, 20, seed)
                .build(EnumerationLimits::unbounded())
                .unwrap()
                .to_string()
        };
        assert_eq!(build(3), build(3));
    }
}
