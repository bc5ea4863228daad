use crate::analysis::enumerator::EnumerationLimits;
use crate::error::BuildError;
use crate::graph::builder::NetworkBuilder;
use crate::graph::network::NetworkState;
use crate::scenario::scenario::Scenario;

/// Fixed sample networks with hand-picked paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sample {
    Simple,
    Diamond,
    Complex,
    Linear,
    Parallel,
    Bottleneck,
}

impl Sample {
    pub const ALL: [Sample; 6] = [
        Sample::Simple,
        Sample::Diamond,
        Sample::Complex,
        Sample::Linear,
        Sample::Parallel,
        Sample::Bottleneck,
    ];

    /// Two disjoint paths: s→v1→t (10, 8) and s→v2→t (6, 12).
    fn simple() -> NetworkBuilder {
        NetworkBuilder::new()
            .source("s")
            .intermediate("v1")
            .intermediate("v2")
            .sink("t")
            .edge("e1", "s", "v1", 10.0)
            .edge("e2", "v1", "t", 8.0)
            .edge("e3", "s", "v2", 6.0)
            .edge("e4", "v2", "t", 12.0)
            .path("P1", &["e1", "e2"])
            .path("P2", &["e3", "e4"])
    }

    fn diamond() -> NetworkBuilder {
        NetworkBuilder::from_edge_list(
            &[("s", "a", 8.0), ("s", "b", 6.0), ("a", "t", 7.0), ("b", "t", 9.0)],
            "s",
            "t",
        )
        .path("P1", &["e0", "e2"])
        .path("P2", &["e1", "e3"])
    }

    fn complex() -> NetworkBuilder {
        NetworkBuilder::from_edge_list(
            &[
                ("s", "a", 12.0),
                ("s", "b", 10.0),
                ("a", "c", 8.0),
                ("a", "d", 9.0),
                ("b", "c", 7.0),
                ("b", "d", 11.0),
                ("c", "t", 15.0),
                ("d", "t", 13.0),
            ],
            "s",
            "t",
        )
        .path("P1", &["e0", "e2", "e6"])
        .path("P2", &["e0", "e3", "e7"])
        .path("P3", &["e1", "e4", "e6"])
        .path("P4", &["e1", "e5", "e7"])
    }

    fn linear() -> NetworkBuilder {
        NetworkBuilder::from_edge_list(
            &[("s", "a", 10.0), ("a", "b", 5.0), ("b", "c", 12.0), ("c", "t", 8.0)],
            "s",
            "t",
        )
        .path("P1", &["e0", "e1", "e2", "e3"])
    }

    fn parallel() -> NetworkBuilder {
        NetworkBuilder::from_edge_list(
            &[
                ("s", "a1", 6.0),
                ("a1", "b1", 8.0),
                ("b1", "t", 7.0),
                ("s", "a2", 9.0),
                ("a2", "b2", 5.0),
                ("b2", "t", 10.0),
                ("s", "a3", 7.0),
                ("a3", "b3", 9.0),
                ("b3", "t", 6.0),
            ],
            "s",
            "t",
        )
        .path("P1", &["e0", "e1", "e2"])
        .path("P2", &["e3", "e4", "e5"])
        .path("P3", &["e6", "e7", "e8"])
    }

    /// Both paths squeeze through c, and then through 2.0 edges.
    fn bottleneck() -> NetworkBuilder {
        NetworkBuilder::from_edge_list(
            &[
                ("s", "a", 15.0),
                ("s", "b", 12.0),
                ("a", "c", 3.0),
                ("b", "c", 3.0),
                ("c", "d", 2.0),
                ("c", "e", 2.0),
                ("d", "t", 10.0),
                ("e", "t", 8.0),
            ],
            "s",
            "t",
        )
        .path("P1", &["e0", "e2", "e4", "e6"])
        .path("P2", &["e1", "e3", "e5", "e7"])
    }
}

impl Scenario for Sample {
    fn name(&self) -> &str {
        match self {
            Sample::Simple => "simple",
            Sample::Diamond => "diamond",
            Sample::Complex => "complex",
            Sample::Linear => "linear",
            Sample::Parallel => "parallel",
            Sample::Bottleneck => "bottleneck",
        }
    }

    fn description(&self) -> &str {
        match self {
            Sample::Simple => "Two disjoint paths, the reference network (4 nodes)",
            Sample::Diamond => "Basic 2-path diamond topology (4 nodes)",
            Sample::Complex => "Multi-layer network with 4 overlapping paths (6 nodes)",
            Sample::Linear => "Single chain with an interior bottleneck (5 nodes)",
            Sample::Parallel => "Three independent parallel paths (8 nodes)",
            Sample::Bottleneck => "Severe central bottleneck shared by both paths (7 nodes)",
        }
    }

    fn build(&self, _limits: EnumerationLimits) -> Result<NetworkState, BuildError> {
        let builder = match self {
            Sample::Simple => Self::simple(),
            Sample::Diamond => Self::diamond(),
            Sample::Complex => Self::complex(),
            Sample::Linear => Self::linear(),
            Sample::Parallel => Self::parallel(),
            Sample::Bottleneck => Self::bottleneck(),
        };
        builder.build()
    }
}
