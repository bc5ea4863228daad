use crate::analysis::report::path_utilization;
use crate::graph::network::NetworkState;
use crate::graph::path::PathId;
use serde::Serialize;
use std::fmt;

/// Derived on demand from the bottleneck and utilization; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PathStatus {
    Blocked,
    Saturated,
    High,
    Normal,
    Low,
}

impl PathStatus {
    pub fn classify(bottleneck: f64, utilization: f64) -> Self {
        match utilization {
            _ if bottleneck <= 0.0 => PathStatus::Blocked,
            u if u >= 1.0 => PathStatus::Saturated,
            u if u >= 0.8 => PathStatus::High,
            u if u >= 0.5 => PathStatus::Normal,
            _ => PathStatus::Low,
        }
    }
}

impl fmt::Display for PathStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PathStatus::Blocked => "BLOCKED",
            PathStatus::Saturated => "SATURATED",
            PathStatus::High => "HIGH",
            PathStatus::Normal => "NORMAL",
            PathStatus::Low => "LOW",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathSnapshot {
    pub edge_sequence: Vec<String>,
    pub current_flow: f64,
    pub bottleneck_capacity: f64,
    pub bottleneck_edge: String,
    pub utilization: f64,
    pub available_capacity: f64,
    pub is_blocked: bool,
    pub status: PathStatus,
}

impl PathSnapshot {
    pub fn capture(network: &NetworkState, id: PathId) -> Self {
        let path = network.path_by_id(id);
        let bottleneck = network.bottleneck(id);
        let utilization = path_utilization(network, id);
        Self {
            edge_sequence: path
                .edges()
                .iter()
                .map(|e| network.edge_by_id(*e).name().to_string())
                .collect(),
            current_flow: path.current_flow(),
            bottleneck_capacity: bottleneck.capacity,
            bottleneck_edge: network.edge_by_id(bottleneck.edge).name().to_string(),
            utilization,
            available_capacity: (bottleneck.capacity - path.current_flow()).max(0.0),
            is_blocked: bottleneck.capacity <= 0.0,
            status: PathStatus::classify(bottleneck.capacity, utilization),
        }
    }
}
