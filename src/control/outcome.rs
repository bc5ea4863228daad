use crate::state::edge_state::EdgeStatus;
use crate::state::path_state::PathStatus;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bottleneck diagnostic for one path: enough for a caller to retry with a
/// feasible value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SafeFlow {
    pub path_id: String,
    pub current_flow: f64,
    pub max_safe_flow: f64,
    pub available_capacity: f64,
    pub suggested_flow: f64,
    pub bottleneck_edge: String,
    pub bottleneck_capacity: f64,
    pub edge_sequence: Vec<String>,
    pub is_blocked: bool,
}

impl fmt::Display for SafeFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Alternatives:")?;
        writeln!(f, "  - Max safe flow: {:.1}", self.max_safe_flow)?;
        writeln!(f, "  - Current available: {:.1}", self.available_capacity)?;
        writeln!(
            f,
            "  - Bottleneck: {} (capacity {:.1})",
            self.bottleneck_edge, self.bottleneck_capacity
        )?;
        write!(f, "  - Suggested: {:.1}", self.suggested_flow)
    }
}

/// Result of an operation that reports the path's bottleneck diagnostic
/// whether or not it succeeded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowAttempt {
    pub success: bool,
    pub message: String,
    /// `None` only when the path does not exist
    pub alternatives: Option<SafeFlow>,
}

impl FlowAttempt {
    pub(crate) fn succeeded(message: String, alternatives: Option<SafeFlow>) -> Self {
        Self {
            success: true,
            message,
            alternatives,
        }
    }

    pub(crate) fn failed(message: String, alternatives: Option<SafeFlow>) -> Self {
        Self {
            success: false,
            message,
            alternatives,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeDetail {
    pub id: String,
    pub from: String,
    pub to: String,
    pub capacity: f64,
    pub flow: f64,
    pub utilization: f64,
    pub is_bottleneck: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathInfo {
    pub path_id: String,
    pub edges: Vec<String>,
    pub edge_count: usize,
    pub current_flow: f64,
    pub bottleneck_capacity: f64,
    pub bottleneck_edge: String,
    pub utilization: f64,
    pub available_capacity: f64,
    pub status: PathStatus,
    pub is_blocked: bool,
    pub edge_details: Vec<EdgeDetail>,
    /// paths with at least one edge in common
    pub shared_paths: Vec<String>,
    pub route_description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathUsage {
    pub path_id: String,
    pub path_flow: f64,
    /// 1-based
    pub path_position: usize,
    pub total_edges: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeInfo {
    pub edge_id: String,
    pub from_node: String,
    pub to_node: String,
    pub capacity: f64,
    pub current_flow: f64,
    pub utilization: f64,
    pub available_capacity: f64,
    pub status: EdgeStatus,
    pub is_disabled: bool,
    pub is_overloaded: bool,
    pub using_paths: Vec<PathUsage>,
    pub path_count: usize,
    pub bottleneck_for: Vec<String>,
    pub is_critical: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathCriteria {
    /// largest bottleneck
    #[default]
    Capacity,
    /// lowest utilization
    Utilization,
    /// least current flow
    Flow,
}
