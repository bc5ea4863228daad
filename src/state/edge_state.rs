use crate::graph::edge::EdgeId;
use crate::graph::network::NetworkState;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EdgeStatus {
    Disabled,
    Overload,
    High,
    Normal,
    Low,
}

impl EdgeStatus {
    pub fn classify(capacity: f64, utilization: f64) -> Self {
        match utilization {
            _ if capacity <= 0.0 => EdgeStatus::Disabled,
            u if u > 1.0 => EdgeStatus::Overload,
            u if u >= 0.8 => EdgeStatus::High,
            u if u >= 0.5 => EdgeStatus::Normal,
            _ => EdgeStatus::Low,
        }
    }
}

impl fmt::Display for EdgeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EdgeStatus::Disabled => "DISABLED",
            EdgeStatus::Overload => "OVERLOAD",
            EdgeStatus::High => "HIGH",
            EdgeStatus::Normal => "NORMAL",
            EdgeStatus::Low => "LOW",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeSnapshot {
    pub from_node: String,
    pub to_node: String,
    pub capacity: f64,
    pub current_flow: f64,
    pub base_capacity: f64,
    pub is_failed: bool,
    /// infinite (serialized as null) when a zero-capacity edge carries flow
    pub utilization: f64,
    pub available_capacity: f64,
    pub status: EdgeStatus,
}

impl EdgeSnapshot {
    pub fn capture(network: &NetworkState, id: EdgeId) -> Self {
        let edge = network.edge_by_id(id);
        let flow = network.edge_flow(id);
        let utilization = edge.utilization(flow);
        Self {
            from_node: network.node_by_id(edge.from()).name().to_string(),
            to_node: network.node_by_id(edge.to()).name().to_string(),
            capacity: edge.capacity(),
            current_flow: flow,
            base_capacity: edge.base_capacity(),
            is_failed: edge.is_failed(),
            utilization,
            available_capacity: (edge.capacity() - flow).max(0.0),
            status: EdgeStatus::classify(edge.capacity(), utilization),
        }
    }
}
