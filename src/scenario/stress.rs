use crate::analysis::enumerator::EnumerationLimits;
use crate::error::BuildError;
use crate::graph::builder::NetworkBuilder;
use crate::graph::network::NetworkState;
use crate::scenario::scenario::Scenario;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const MIN_CAPACITY: f64 = 1.0;
const MAX_CAPACITY: f64 = 10.0;

/// Uniform capacity rounded to one decimal.
pub(crate) fn capacity(rng: &mut StdRng, min: f64, max: f64) -> f64 {
    (rng.gen_range(min..max) * 10.0).round() / 10.0
}

/// `rows × cols` lattice with right and down edges, s top-left, t
/// bottom-right.
pub struct GridScenario {
    rows: usize,
    cols: usize,
    seed: u64,
}

impl GridScenario {
    pub fn new(rows: usize, cols: usize, seed: u64) -> Self {
        Self {
            rows: rows.max(1),
            cols: cols.max(2),
            seed,
        }
    }

    fn node_name(&self, r: usize, c: usize) -> String {
        if r == 0 && c == 0 {
            "s".to_string()
        } else if r == self.rows - 1 && c == self.cols - 1 {
            "t".to_string()
        } else {
            format!("v{}_{}", r, c)
        }
    }
}

impl Scenario for GridScenario {
    fn name(&self) -> &str {
        "grid"
    }

    fn description(&self) -> &str {
        "Grid topology with many equal-length routes"
    }

    fn build(&self, limits: EnumerationLimits) -> Result<NetworkState, BuildError> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut builder = NetworkBuilder::new();
        for r in 0..self.rows {
            for c in 0..self.cols {
                let name = self.node_name(r, c);
                builder = match name.as_str() {
                    "s" => builder.source(&name),
                    "t" => builder.sink(&name),
                    _ => builder.intermediate(&name),
                };
            }
        }

        let mut eid = 0;
        for r in 0..self.rows {
            for c in 0..self.cols {
                let from = self.node_name(r, c);
                let neighbours = [
                    (c + 1 < self.cols).then(|| self.node_name(r, c + 1)),
                    (r + 1 < self.rows).then(|| self.node_name(r + 1, c)),
                ];
                for to in neighbours.into_iter().flatten() {
                    let cap = capacity(&mut rng, MIN_CAPACITY, MAX_CAPACITY);
                    builder = builder.edge(&format!("e{}", eid), &from, &to, cap);
                    eid += 1;
                }
            }
        }
        builder.enumerate_paths(limits).build()
    }
}

/// s → hub → spoke_i → t, one path per spoke. Every path shares the
/// s → hub edge.
pub struct StarScenario {
    spokes: usize,
    seed: u64,
}

impl StarScenario {
    pub fn new(spokes: usize, seed: u64) -> Self {
        Self {
            spokes: spokes.max(1),
            seed,
        }
    }
}

impl Scenario for StarScenario {
    fn name(&self) -> &str {
        "star"
    }

    fn description(&self) -> &str {
        "Hub-and-spoke topology with a shared hub bottleneck"
    }

    fn build(&self, _limits: EnumerationLimits) -> Result<NetworkState, BuildError> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut builder = NetworkBuilder::new().source("s").intermediate("hub").sink("t");
        for i in 0..self.spokes {
            builder = builder.intermediate(&format!("spoke{}", i));
        }

        builder = builder.edge("e0", "s", "hub", capacity(&mut rng, MIN_CAPACITY, MAX_CAPACITY));
        for i in 0..self.spokes {
            let cap = capacity(&mut rng, MIN_CAPACITY, MAX_CAPACITY);
            builder = builder.edge(&format!("e{}", 1 + i), "hub", &format!("spoke{}", i), cap);
        }
        for i in 0..self.spokes {
            let cap = capacity(&mut rng, MIN_CAPACITY, MAX_CAPACITY);
            builder = builder.edge(&format!("e{}", 1 + self.spokes + i), &format!("spoke{}", i), "t", cap);
        }

        for i in 0..self.spokes {
            let out = format!("e{}", 1 + i);
            let back = format!("e{}", 1 + self.spokes + i);
            builder = builder.path(&format!("P{}", i + 1), &["e0", out.as_str(), back.as_str()]);
        }
        builder.build()
    }
}

/// Fully connected adjacent layers; the first and last layers collapse to
/// s and t.
pub struct LayeredScenario {
    layers: Vec<usize>,
    seed: u64,
}

impl LayeredScenario {
    pub fn new(layers: Vec<usize>, seed: u64) -> Self {
        Self { layers, seed }
    }

    fn layer_nodes(&self) -> Vec<Vec<String>> {
        let last = self.layers.len().saturating_sub(1);
        self.layers
            .iter()
            .enumerate()
            .map(|(l, size)| match l {
                0 => vec!["s".to_string()],
                _ if l == last => vec!["t".to_string()],
                _ => (0..*size).map(|i| format!("v{}_{}", l, i)).collect(),
            })
            .collect()
    }
}

impl Scenario for LayeredScenario {
    fn name(&self) -> &str {
        "layered"
    }

    fn description(&self) -> &str {
        "Hierarchical layers with dense connections between neighbours"
    }

    fn build(&self, limits: EnumerationLimits) -> Result<NetworkState, BuildError> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let layers = self.layer_nodes();
        let last = layers.len().saturating_sub(1);

        let mut builder = NetworkBuilder::new();
        for (l, nodes) in layers.iter().enumerate() {
            for name in nodes {
                builder = match l {
                    0 => builder.source(name),
                    _ if l == last => builder.sink(name),
                    _ => builder.intermediate(name),
                };
            }
        }

        let mut eid = 0;
        for pair in layers.windows(2) {
            for from in &pair[0] {
                for to in &pair[1] {
                    let cap = capacity(&mut rng, MIN_CAPACITY, MAX_CAPACITY);
                    builder = builder.edge(&format!("e{}", eid), from, to, cap);
                    eid += 1;
                }
            }
        }
        builder.enumerate_paths(limits).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_paths_are_lattice_routes() {
        // C(4, 2) monotone routes through a 3x3 lattice
        let n = GridScenario::new(3, 3, 7)
            .build(EnumerationLimits::unbounded())
            .unwrap();
        assert_eq!(9, n.node_count());
        assert_eq!(12, n.edges().len());
        assert_eq!(6, n.paths().len());
        assert!(n.paths().iter().all(|p| p.edges().len() == 4));
    }

    #[test]
    fn test_grid_respects_path_limit() {
        let n = GridScenario::new(4, 4, 7)
            .build(EnumerationLimits::new(None, Some(5)))
            .unwrap();
        assert_eq!(5, n.paths().len());
    }

    #[test]
    fn test_star_shares_hub_edge() {
        let n = StarScenario::new(5, 3)
            .build(EnumerationLimits::unbounded())
            .unwrap();
        assert_eq!(8, n.node_count());
        assert_eq!(5, n.paths().len());
        assert_eq!(5, n.paths_using(n.edge_id("e0").unwrap()).len());
    }

    #[test]
    fn test_layered_counts() {
        let n = LayeredScenario::new(vec![1, 3, 2, 1], 3)
            .build(EnumerationLimits::unbounded())
            .unwrap();
        assert_eq!(7, n.node_count());
        assert_eq!(3 + 6 + 2, n.edges().len());
        assert_eq!(6, n.paths().len());
    }

    #[test]
    fn test_capacities_are_seeded() {
        let a = GridScenario::new(3, 3, 11).build(EnumerationLimits::unbounded()).unwrap();
        let b = GridScenario::new(3, 3, 11).build(EnumerationLimits::unbounded()).unwrap();
        let caps = |n: &NetworkState| n.edges().iter().map(|e| e.capacity()).collect::<Vec<_>>();
        assert_eq!(caps(&a), caps(&b));
        assert!(caps(&a).iter().all(|c| (MIN_CAPACITY..=MAX_CAPACITY).contains(c)));
    }
}
