use crate::analysis::maxflow::MaxFlowOracle;
use crate::graph::network::NetworkState;
use crate::state::edge_state::EdgeSnapshot;
use crate::state::path_state::PathSnapshot;
use serde::Serialize;
use std::collections::BTreeMap;

/// Bumped whenever a field is renamed or removed.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemMetrics {
    pub total_throughput: f64,
    pub theoretical_max_flow: f64,
    /// throughput / theoretical max, 0.0 when the max is 0
    pub network_efficiency: f64,
    pub path_based_max_flow: f64,
    pub flow_conservation_violations: usize,
    pub operational_edges: usize,
    pub failed_edges: usize,
    pub blocked_paths: usize,
}

/// Complete observable state of a network, keyed by edge and path name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkSnapshot {
    pub version: u32,
    pub edges: BTreeMap<String, EdgeSnapshot>,
    pub paths: BTreeMap<String, PathSnapshot>,
    pub system_metrics: SystemMetrics,
}

impl NetworkSnapshot {
    pub fn capture(network: &NetworkState) -> Self {
        let edges = network
            .edges()
            .iter()
            .map(|e| (e.name().to_string(), EdgeSnapshot::capture(network, e.id())))
            .collect::<BTreeMap<_, _>>();
        let paths = network
            .paths()
            .iter()
            .map(|p| (p.name().to_string(), PathSnapshot::capture(network, p.id())))
            .collect::<BTreeMap<_, _>>();

        let oracle = MaxFlowOracle::new(network);
        let total_throughput = network.total_throughput();
        let theoretical_max_flow = oracle.max_flow_value();
        let failed_edges = network.edges().iter().filter(|e| e.is_failed()).count();

        let system_metrics = SystemMetrics {
            total_throughput,
            theoretical_max_flow,
            network_efficiency: if theoretical_max_flow > 0.0 {
                total_throughput / theoretical_max_flow
            } else {
                0.0
            },
            path_based_max_flow: oracle.path_based_max_flow(),
            flow_conservation_violations: network.validate_flow_conservation().len(),
            operational_edges: network.edges().len() - failed_edges,
            failed_edges,
            blocked_paths: paths.values().filter(|p| p.is_blocked).count(),
        };

        Self {
            version: SNAPSHOT_VERSION,
            edges,
            paths,
            system_metrics,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
