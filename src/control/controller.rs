use crate::analysis::report::{path_utilization, path_utilizations, ValidationReport};
use crate::control::outcome::{
    EdgeDetail, EdgeInfo, FlowAttempt, PathCriteria, PathInfo, PathUsage, SafeFlow,
};
use crate::error::{ControlError, ControlResult};
use crate::graph::edge::EdgeId;
use crate::graph::network::NetworkState;
use crate::graph::path::PathId;
use crate::state::edge_state::EdgeStatus;
use crate::state::path_state::PathStatus;
use crate::state::snapshot::NetworkSnapshot;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Slack for accumulated floating point error when a flow change lands
/// exactly on zero or on the bottleneck.
const FLOW_TOLERANCE: f64 = 1e-9;
const SATURATION_TOLERANCE: f64 = 0.001;

/// The only writer of path flows. Every rejection leaves the network as it
/// was.
pub struct FlowController {
    network: NetworkState,
}

impl FlowController {
    pub fn new(network: NetworkState) -> Self {
        Self { network }
    }

    pub fn network(&self) -> &NetworkState {
        &self.network
    }

    /// For fault injection. Call `handle_failed_edges` afterwards.
    pub fn network_mut(&mut self) -> &mut NetworkState {
        &mut self.network
    }

    fn path_id(&self, path: &str) -> ControlResult<PathId> {
        self.network
            .path_id(path)
            .ok_or_else(|| ControlError::PathNotFound(path.to_string()))
    }

    fn edge_id(&self, edge: &str) -> ControlResult<EdgeId> {
        self.network.edge_id(edge).ok_or_else(|| ControlError::EdgeNotFound {
            edge: edge.to_string(),
            available: self
                .network
                .edges()
                .iter()
                .map(|e| e.name())
                .collect::<Vec<_>>()
                .join(", "),
        })
    }

    pub fn update_path_flow(&mut self, path: &str, delta: f64) -> ControlResult {
        let id = self.path_id(path)?;
        if !delta.is_finite() {
            return Err(ControlError::InvalidAmount(delta, path.to_string()));
        }
        let mut new_flow = self.network.path_by_id(id).current_flow() + delta;

        if delta < 0.0 && new_flow < -FLOW_TOLERANCE {
            debug!(path, delta, new_flow, "rejected flow decrease");
            return Err(ControlError::NegativeFlow {
                path: path.to_string(),
                resulting: new_flow,
            });
        }
        if delta > 0.0 {
            let bottleneck = self.network.bottleneck(id);
            let edge = self.network.edge_by_id(bottleneck.edge).name().to_string();
            if bottleneck.capacity <= 0.0 {
                debug!(path, edge = %edge, "rejected flow increase on blocked path");
                return Err(ControlError::PathBlocked {
                    path: path.to_string(),
                    edge,
                });
            }
            if new_flow > bottleneck.capacity + FLOW_TOLERANCE {
                debug!(path, delta, edge = %edge, "rejected flow increase over bottleneck");
                return Err(ControlError::CapacityExceeded {
                    path: path.to_string(),
                    delta,
                    excess: new_flow - bottleneck.capacity,
                    edge,
                });
            }
            new_flow = new_flow.min(bottleneck.capacity);
            self.network.refresh_bottleneck(id);
        }

        self.network.path_by_id_mut(id).set_flow(new_flow);
        debug!(path, delta, flow = self.network.path_by_id(id).current_flow(), "path flow updated");
        Ok(format!("Updated path {} flow by {:.2}", path, delta))
    }

    pub fn set_path_flow(&mut self, path: &str, target: f64) -> ControlResult {
        let id = self.path_id(path)?;
        if !target.is_finite() {
            return Err(ControlError::InvalidAmount(target, path.to_string()));
        }
        let delta = target - self.network.path_by_id(id).current_flow();
        self.update_path_flow(path, delta)
    }

    pub fn clear_all_flows(&mut self) {
        (0..self.network.paths().len())
            .for_each(|i| self.network.path_by_id_mut(PathId(i)).set_flow(0.0));
        debug!("all flows cleared");
    }

    /// Clears everything, then gives each path `total / N` without regard to
    /// differing bottlenecks. Paths that accept keep their share.
    pub fn distribute_flow_equally(&mut self, total: f64) -> ControlResult {
        let count = self.network.paths().len();
        if count == 0 {
            return Err(ControlError::NoPaths);
        }
        self.clear_all_flows();
        let share = total / count as f64;
        let names = self
            .network
            .paths()
            .iter()
            .map(|p| p.name().to_string())
            .collect::<Vec<_>>();
        let updated = names
            .iter()
            .filter(|name| self.set_path_flow(name, share).is_ok())
            .count();

        if updated == count {
            Ok(format!(
                "Successfully distributed {:.2} flow equally among {} paths",
                total, count
            ))
        } else {
            Err(ControlError::PartialDistribution {
                updated,
                total: count,
            })
        }
    }

    pub fn get_path_utilizations(&self) -> BTreeMap<String, f64> {
        path_utilizations(&self.network)
    }

    /// Zeroes every flowing path that touches a failed or zero-capacity edge,
    /// even when the rest of the path is healthy.
    pub fn handle_failed_edges(&mut self) -> (usize, Vec<String>) {
        let mut affected = self
            .network
            .edges()
            .iter()
            .filter(|e| e.is_down())
            .flat_map(|e| self.network.paths_using(e.id()).iter().copied())
            .collect::<Vec<_>>();
        affected.sort();
        affected.dedup();

        let flowing = affected
            .into_iter()
            .filter(|p| self.network.path_by_id(*p).current_flow() > 0.0)
            .map(|p| self.network.path_by_id(p).name().to_string())
            .collect::<Vec<_>>();
        let zeroed = flowing
            .into_iter()
            .filter(|name| self.set_path_flow(name, 0.0).is_ok())
            .collect::<Vec<_>>();

        if !zeroed.is_empty() {
            warn!(paths = ?zeroed, "zeroed flows on paths crossing failed edges");
        }
        (zeroed.len(), zeroed)
    }

    /// Lowers every path carrying more than its bottleneck down to it, as
    /// happens after a capacity cut. Returns the paths touched.
    pub fn clamp_to_bottlenecks(&mut self) -> Vec<String> {
        let over = self
            .network
            .paths()
            .iter()
            .filter(|p| p.current_flow() > self.network.bottleneck(p.id()).capacity + FLOW_TOLERANCE)
            .map(|p| (p.name().to_string(), self.network.bottleneck(p.id()).capacity))
            .collect::<Vec<_>>();
        let clamped = over
            .into_iter()
            .filter(|(name, capacity)| self.set_path_flow(name, *capacity).is_ok())
            .map(|(name, _)| name)
            .collect::<Vec<_>>();

        if !clamped.is_empty() {
            warn!(paths = ?clamped, "clamped flows to reduced bottlenecks");
        }
        clamped
    }

    pub fn calculate_max_safe_flow(&self, path: &str) -> ControlResult<SafeFlow> {
        let id = self.path_id(path)?;
        let p = self.network.path_by_id(id);
        let bottleneck = self.network.bottleneck(id);
        let available = (bottleneck.capacity - p.current_flow()).max(0.0);
        Ok(SafeFlow {
            path_id: path.to_string(),
            current_flow: p.current_flow(),
            max_safe_flow: bottleneck.capacity,
            available_capacity: available,
            suggested_flow: (p.current_flow() + available).min(bottleneck.capacity),
            bottleneck_edge: self.network.edge_by_id(bottleneck.edge).name().to_string(),
            bottleneck_capacity: bottleneck.capacity,
            edge_sequence: p
                .edges()
                .iter()
                .map(|e| self.network.edge_by_id(*e).name().to_string())
                .collect(),
            is_blocked: bottleneck.capacity <= 0.0,
        })
    }

    pub fn set_path_flow_with_alternatives(&mut self, path: &str, target: f64) -> FlowAttempt {
        if let Err(e) = self.path_id(path) {
            return FlowAttempt::failed(e.to_string(), None);
        }
        let result = self.set_path_flow(path, target);
        let alternatives = self.calculate_max_safe_flow(path).ok();
        match (result, alternatives) {
            (Ok(message), alternatives) => FlowAttempt::succeeded(message, alternatives),
            (Err(e), Some(alternatives)) => {
                FlowAttempt::failed(format!("{}\n{}", e, alternatives), Some(alternatives))
            }
            (Err(e), None) => FlowAttempt::failed(e.to_string(), None),
        }
    }

    /// Sets the path's flow to its bottleneck. A path already within 0.001
    /// of it is left alone.
    pub fn saturate_path_flow(&mut self, path: &str) -> FlowAttempt {
        let before = match self.calculate_max_safe_flow(path) {
            Ok(safe) => safe,
            Err(e) => return FlowAttempt::failed(e.to_string(), None),
        };
        if before.is_blocked {
            return FlowAttempt::failed(
                format!("Path {} is blocked (bottleneck capacity = 0)", path),
                Some(before),
            );
        }
        if (before.current_flow - before.max_safe_flow).abs() < SATURATION_TOLERANCE {
            return FlowAttempt::succeeded(
                format!(
                    "Path {} already saturated at {:.1} (bottleneck: {})",
                    path, before.current_flow, before.bottleneck_edge
                ),
                Some(before),
            );
        }

        match self.set_path_flow(path, before.max_safe_flow) {
            Ok(_) => FlowAttempt::succeeded(
                format!(
                    "Path {} saturated: {:.1} → {:.1} (bottleneck: {})",
                    path, before.current_flow, before.max_safe_flow, before.bottleneck_edge
                ),
                self.calculate_max_safe_flow(path).ok(),
            ),
            Err(e) => FlowAttempt::failed(
                format!("Failed to saturate {}: {}", path, e),
                Some(before),
            ),
        }
    }

    pub fn validate_and_report(&mut self) -> ValidationReport {
        self.network.calculate_total_throughput();
        ValidationReport::collect(&self.network)
    }

    pub fn get_complete_network_state(&mut self) -> NetworkSnapshot {
        self.network.calculate_total_throughput();
        NetworkSnapshot::capture(&self.network)
    }

    /// First path wins ties.
    pub fn find_best_path(&self, criteria: PathCriteria) -> Option<String> {
        let score = |id: PathId| match criteria {
            PathCriteria::Capacity => self.network.bottleneck(id).capacity,
            PathCriteria::Utilization => -path_utilization(&self.network, id),
            PathCriteria::Flow => -self.network.path_by_id(id).current_flow(),
        };
        self.network
            .paths()
            .iter()
            .map(|p| (p, score(p.id())))
            .fold(None, |best: Option<(&_, f64)>, (p, value)| match best {
                Some((_, best_value)) if value <= best_value => best,
                _ => Some((p, value)),
            })
            .map(|(p, _)| p.name().to_string())
    }

    /// Snapshots the capacity on first disable, then zeroes any path routed
    /// over the edge.
    pub fn disable_edge(&mut self, edge: &str) -> ControlResult {
        let id = self.edge_id(edge)?;
        if self.network.edge_by_id(id).is_failed() {
            return Err(ControlError::EdgeAlreadyDisabled(edge.to_string()));
        }
        self.network.edge_by_id_mut(id).disable();

        let mut cleared = Vec::new();
        for p in self.network.paths_using(id).to_vec() {
            if self.network.path_by_id(p).current_flow() > 0.0 {
                self.network.path_by_id_mut(p).set_flow(0.0);
                cleared.push(self.network.path_by_id(p).name().to_string());
            }
        }

        info!(edge, cleared = ?cleared, "edge disabled");
        if cleared.is_empty() {
            Ok(format!("Edge {} disabled", edge))
        } else {
            Ok(format!(
                "Edge {} disabled (cleared flows: {})",
                edge,
                cleared.join(", ")
            ))
        }
    }

    pub fn enable_edge(&mut self, edge: &str) -> ControlResult {
        let id = self.edge_id(edge)?;
        if !self.network.edge_by_id(id).is_failed() {
            return Err(ControlError::EdgeAlreadyEnabled(edge.to_string()));
        }
        let capacity = self.network.edge_by_id_mut(id).enable();
        info!(edge, capacity, "edge enabled");
        Ok(format!("Edge {} enabled (capacity: {:.1})", edge, capacity))
    }

    pub fn get_path_info(&self, path: &str) -> ControlResult<PathInfo> {
        let id = self.path_id(path)?;
        let n = &self.network;
        let p = n.path_by_id(id);
        let bottleneck = n.bottleneck(id);
        let utilization = path_utilization(n, id);
        let node_name = |node| n.node_by_id(node).name().to_string();

        let edge_details = p
            .edges()
            .iter()
            .map(|e| {
                let edge = n.edge_by_id(*e);
                let flow = n.edge_flow(*e);
                EdgeDetail {
                    id: edge.name().to_string(),
                    from: node_name(edge.from()),
                    to: node_name(edge.to()),
                    capacity: edge.capacity(),
                    flow,
                    utilization: edge.utilization(flow),
                    is_bottleneck: *e == bottleneck.edge,
                }
            })
            .collect::<Vec<_>>();

        let mut shared = p
            .edges()
            .iter()
            .flat_map(|e| n.paths_using(*e).iter().copied())
            .filter(|other| *other != id)
            .collect::<Vec<_>>();
        shared.sort();
        shared.dedup();

        let route = std::iter::once(node_name(n.edge_by_id(p.edges()[0]).from()))
            .chain(p.edges().iter().map(|e| node_name(n.edge_by_id(*e).to())))
            .collect::<Vec<_>>()
            .join(" → ");

        Ok(PathInfo {
            path_id: path.to_string(),
            edges: edge_details.iter().map(|d| d.id.clone()).collect(),
            edge_count: p.edges().len(),
            current_flow: p.current_flow(),
            bottleneck_capacity: bottleneck.capacity,
            bottleneck_edge: n.edge_by_id(bottleneck.edge).name().to_string(),
            utilization,
            available_capacity: (bottleneck.capacity - p.current_flow()).max(0.0),
            status: PathStatus::classify(bottleneck.capacity, utilization),
            is_blocked: bottleneck.capacity <= 0.0,
            edge_details,
            shared_paths: shared
                .into_iter()
                .map(|other| n.path_by_id(other).name().to_string())
                .collect(),
            route_description: route,
        })
    }

    pub fn get_edge_info(&self, edge: &str) -> ControlResult<EdgeInfo> {
        let id = self.edge_id(edge)?;
        let n = &self.network;
        let e = n.edge_by_id(id);
        let flow = n.edge_flow(id);
        let utilization = e.utilization(flow);

        let using_paths = n
            .paths_using(id)
            .iter()
            .map(|p| {
                let path = n.path_by_id(*p);
                PathUsage {
                    path_id: path.name().to_string(),
                    path_flow: path.current_flow(),
                    path_position: path.edges().iter().position(|x| *x == id).unwrap_or(0) + 1,
                    total_edges: path.edges().len(),
                }
            })
            .collect::<Vec<_>>();
        let bottleneck_for = n
            .paths_using(id)
            .iter()
            .filter(|p| n.bottleneck(**p).edge == id)
            .map(|p| n.path_by_id(*p).name().to_string())
            .collect::<Vec<_>>();

        Ok(EdgeInfo {
            edge_id: edge.to_string(),
            from_node: n.node_by_id(e.from()).name().to_string(),
            to_node: n.node_by_id(e.to()).name().to_string(),
            capacity: e.capacity(),
            current_flow: flow,
            utilization,
            available_capacity: (e.capacity() - flow).max(0.0),
            status: EdgeStatus::classify(e.capacity(), utilization),
            is_disabled: e.capacity() <= 0.0,
            is_overloaded: utilization > 1.0,
            path_count: using_paths.len(),
            using_paths,
            is_critical: !bottleneck_for.is_empty(),
            bottleneck_for,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::NetworkBuilder;
    use approx::assert_relative_eq;

    fn reference() -> FlowController {
        FlowController::new(
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
                .build()
                .unwrap(),
        )
    }

    //  s → a → t
    //      ↓   ↑
    //      b ──┘
    fn shared_trunk() -> FlowController {
        FlowController::new(
            NetworkBuilder::from_edge_list(
                &[("s", "a", 10.0), ("a", "t", 4.0), ("a", "b", 5.0), ("b", "t", 7.0)],
                "s",
                "t",
            )
            .build()
            .unwrap(),
        )
    }

    fn flow(c: &FlowController, path: &str) -> f64 {
        c.network().path(path).unwrap().current_flow()
    }

    fn edge_flow(c: &FlowController, edge: &str) -> f64 {
        c.network().edge_flow(c.network().edge_id(edge).unwrap())
    }

    #[test]
    fn test_update_within_bottleneck() {
        let mut c = reference();
        assert_eq!(
            Ok("Updated path P1 flow by 5.00".to_string()),
            c.update_path_flow("P1", 5.0)
        );
        assert_relative_eq!(5.0, flow(&c, "P1"));
        assert_relative_eq!(5.0, edge_flow(&c, "e1"));
        assert_relative_eq!(5.0, edge_flow(&c, "e2"));
        assert_relative_eq!(0.0, edge_flow(&c, "e3"));
    }

    #[test]
    fn test_update_over_bottleneck_is_rejected() {
        let mut c = reference();
        c.update_path_flow("P1", 5.0).unwrap();
        let err = c.update_path_flow("P1", 4.0).unwrap_err();
        assert_eq!(
            ControlError::CapacityExceeded {
                path: "P1".to_string(),
                delta: 4.0,
                excess: 1.0,
                edge: "e2".to_string()
            },
            err
        );
        assert_eq!(
            "Cannot update flow: flow increase of 4.00 would exceed capacity by 1.00 at edge e2",
            err.to_string()
        );
        assert_relative_eq!(5.0, flow(&c, "P1"));
    }

    #[test]
    fn test_decrease_below_zero_is_rejected() {
        let mut c = reference();
        c.update_path_flow("P2", 2.0).unwrap();
        assert!(matches!(
            c.update_path_flow("P2", -3.0),
            Err(ControlError::NegativeFlow { .. })
        ));
        assert_relative_eq!(2.0, flow(&c, "P2"));
        c.update_path_flow("P2", -2.0).unwrap();
        assert_relative_eq!(0.0, flow(&c, "P2"));
    }

    #[test]
    fn test_unknown_path_and_bad_amounts() {
        let mut c = reference();
        assert_eq!(
            Err(ControlError::PathNotFound("P9".to_string())),
            c.update_path_flow("P9", 1.0)
        );
        assert!(matches!(
            c.set_path_flow("P1", f64::NAN),
            Err(ControlError::InvalidAmount(..))
        ));
        assert!(c.update_path_flow("P1", 0.0).is_ok());
    }

    #[test]
    fn test_increase_on_blocked_path() {
        let mut c = reference();
        c.network_mut().edge_mut("e3").unwrap().fail();
        assert_eq!(
            Err(ControlError::PathBlocked {
                path: "P2".to_string(),
                edge: "e3".to_string()
            }),
            c.update_path_flow("P2", 1.0)
        );
    }

    #[test]
    fn test_set_path_flow_targets_absolute_value() {
        let mut c = reference();
        c.set_path_flow("P1", 3.0).unwrap();
        c.set_path_flow("P1", 8.0).unwrap();
        assert_relative_eq!(8.0, flow(&c, "P1"));
        c.set_path_flow("P1", 1.5).unwrap();
        assert_relative_eq!(1.5, flow(&c, "P1"));
    }

    #[test]
    fn test_shared_edge_flows_add_up() {
        let mut c = shared_trunk();
        c.set_path_flow("P1", 4.0).unwrap();
        c.set_path_flow("P2", 5.0).unwrap();
        assert_relative_eq!(9.0, edge_flow(&c, "e0"));
        assert_relative_eq!(9.0, c.network().total_throughput());
        assert!(c.network().validate_flow_conservation().is_empty());
    }

    #[test]
    fn test_distribute_equally_reports_partial_success() {
        let mut c = reference();
        assert!(c.distribute_flow_equally(10.0).is_ok());
        assert_relative_eq!(5.0, flow(&c, "P1"));
        assert_relative_eq!(5.0, flow(&c, "P2"));

        assert_eq!(
            Err(ControlError::PartialDistribution {
                updated: 1,
                total: 2
            }),
            c.distribute_flow_equally(14.0)
        );
        assert_relative_eq!(7.0, flow(&c, "P1"));
        assert_relative_eq!(0.0, flow(&c, "P2"));
    }

    #[test]
    fn test_path_utilizations() {
        let mut c = reference();
        c.set_path_flow("P1", 4.0).unwrap();
        let utilizations = c.get_path_utilizations();
        assert_relative_eq!(0.5, utilizations["P1"]);
        assert_relative_eq!(0.0, utilizations["P2"]);
    }

    #[test]
    fn test_handle_failed_edges_zeroes_only_affected_paths() {
        let mut c = reference();
        c.set_path_flow("P1", 5.0).unwrap();
        c.set_path_flow("P2", 3.0).unwrap();
        c.network_mut().edge_mut("e1").unwrap().fail();

        assert_eq!((1, vec!["P1".to_string()]), c.handle_failed_edges());
        assert_relative_eq!(0.0, flow(&c, "P1"));
        assert_relative_eq!(3.0, flow(&c, "P2"));
        assert_eq!((0, Vec::<String>::new()), c.handle_failed_edges());
    }

    #[test]
    fn test_handle_zero_capacity_edge_without_failure_flag() {
        let mut c = shared_trunk();
        c.set_path_flow("P1", 2.0).unwrap();
        c.set_path_flow("P2", 2.0).unwrap();
        c.network_mut().edge_mut("e0").unwrap().set_capacity(0.0);
        let (count, paths) = c.handle_failed_edges();
        assert_eq!(2, count);
        assert_eq!(vec!["P1", "P2"], paths);
    }

    #[test]
    fn test_clamp_to_reduced_bottleneck() {
        let mut c = reference();
        c.set_path_flow("P1", 7.0).unwrap();
        c.set_path_flow("P2", 5.0).unwrap();
        c.network_mut().edge_mut("e2").unwrap().set_capacity(4.5);

        assert_eq!(vec!["P1".to_string()], c.clamp_to_bottlenecks());
        assert_relative_eq!(4.5, flow(&c, "P1"));
        assert_relative_eq!(5.0, flow(&c, "P2"));
        assert!(c.validate_and_report().capacity_overloads.is_empty());
        assert!(c.clamp_to_bottlenecks().is_empty());
    }

    #[test]
    fn test_max_safe_flow() {
        let mut c = reference();
        c.set_path_flow("P1", 3.0).unwrap();
        let safe = c.calculate_max_safe_flow("P1").unwrap();
        assert_relative_eq!(8.0, safe.max_safe_flow);
        assert_relative_eq!(5.0, safe.available_capacity);
        assert_relative_eq!(8.0, safe.suggested_flow);
        assert_eq!("e2", safe.bottleneck_edge);
        assert_eq!(vec!["e1", "e2"], safe.edge_sequence);
        assert!(!safe.is_blocked);
    }

    #[test]
    fn test_rejection_carries_alternatives() {
        let mut c = reference();
        let attempt = c.set_path_flow_with_alternatives("P1", 10.0);
        assert!(!attempt.success);
        let alternatives = attempt.alternatives.unwrap();
        assert_relative_eq!(8.0, alternatives.max_safe_flow);
        assert_relative_eq!(8.0, alternatives.available_capacity);
        assert!(attempt.message.contains("Alternatives:"));
        assert!(attempt.message.contains("Bottleneck: e2 (capacity 8.0)"));

        let attempt = c.set_path_flow_with_alternatives("P1", 6.0);
        assert!(attempt.success);
        assert_relative_eq!(2.0, attempt.alternatives.unwrap().available_capacity);

        let attempt = c.set_path_flow_with_alternatives("P7", 1.0);
        assert!(!attempt.success);
        assert!(attempt.alternatives.is_none());
    }

    #[test]
    fn test_saturate() {
        let mut c = reference();
        let attempt = c.saturate_path_flow("P2");
        assert!(attempt.success);
        assert_eq!("Path P2 saturated: 0.0 → 6.0 (bottleneck: e3)", attempt.message);
        assert_relative_eq!(6.0, flow(&c, "P2"));

        let again = c.saturate_path_flow("P2");
        assert!(again.success);
        assert!(again.message.contains("already saturated"));
        assert_relative_eq!(6.0, flow(&c, "P2"));
    }

    #[test]
    fn test_saturate_blocked_path() {
        let mut c = reference();
        c.disable_edge("e4").unwrap();
        let attempt = c.saturate_path_flow("P2");
        assert!(!attempt.success);
        assert!(attempt.alternatives.unwrap().is_blocked);
    }

    #[test]
    fn test_validate_and_report_updates_total_flow() {
        let mut c = reference();
        c.set_path_flow("P1", 2.0).unwrap();
        c.set_path_flow("P2", 1.0).unwrap();
        let report = c.validate_and_report();
        assert!(report.is_valid);
        assert_relative_eq!(3.0, report.total_throughput);
        assert_relative_eq!(3.0, c.network().total_flow());
    }

    #[test]
    fn test_complete_state() {
        let mut c = reference();
        c.set_path_flow("P2", 6.0).unwrap();
        let snapshot = c.get_complete_network_state();
        assert_relative_eq!(6.0, snapshot.system_metrics.total_throughput);
        assert_relative_eq!(14.0, snapshot.system_metrics.theoretical_max_flow);
        assert_eq!(PathStatus::Saturated, snapshot.paths["P2"].status);
    }

    #[test]
    fn test_find_best_path() {
        let mut c = reference();
        assert_eq!(Some("P1".to_string()), c.find_best_path(PathCriteria::Capacity));
        c.set_path_flow("P1", 4.0).unwrap();
        c.set_path_flow("P2", 1.0).unwrap();
        assert_eq!(Some("P2".to_string()), c.find_best_path(PathCriteria::Utilization));
        assert_eq!(Some("P2".to_string()), c.find_best_path(PathCriteria::Flow));
    }

    #[test]
    fn test_find_best_path_tie_goes_to_first() {
        let c = reference();
        assert_eq!(Some("P1".to_string()), c.find_best_path(PathCriteria::Flow));
    }

    #[test]
    fn test_disable_and_enable_edge() {
        let mut c = reference();
        c.set_path_flow("P1", 5.0).unwrap();
        assert_eq!(
            Ok("Edge e1 disabled (cleared flows: P1)".to_string()),
            c.disable_edge("e1")
        );
        assert_relative_eq!(0.0, flow(&c, "P1"));
        assert_relative_eq!(0.0, edge_flow(&c, "e2"));
        assert_eq!(
            Err(ControlError::EdgeAlreadyDisabled("e1".to_string())),
            c.disable_edge("e1")
        );

        assert_eq!(
            Ok("Edge e1 enabled (capacity: 10.0)".to_string()),
            c.enable_edge("e1")
        );
        assert_eq!(
            Err(ControlError::EdgeAlreadyEnabled("e1".to_string())),
            c.enable_edge("e1")
        );
        assert!(c.set_path_flow("P1", 8.0).is_ok());
    }

    #[test]
    fn test_enable_restores_snapshot_not_base() {
        let mut c = reference();
        c.network_mut().edge_mut("e2").unwrap().set_capacity(5.0);
        c.disable_edge("e2").unwrap();
        assert_eq!(
            Ok("Edge e2 enabled (capacity: 5.0)".to_string()),
            c.enable_edge("e2")
        );
    }

    #[test]
    fn test_unknown_edge_lists_available() {
        let mut c = reference();
        let err = c.disable_edge("e9").unwrap_err();
        assert_eq!("Edge e9 not found. Available: e1, e2, e3, e4", err.to_string());
    }

    #[test]
    fn test_path_info() {
        let mut c = shared_trunk();
        c.set_path_flow("P2", 5.0).unwrap();
        let info = c.get_path_info("P2").unwrap();
        assert_eq!(vec!["e0", "e2", "e3"], info.edges);
        assert_eq!(3, info.edge_count);
        assert_eq!("e2", info.bottleneck_edge);
        assert_eq!(PathStatus::Saturated, info.status);
        assert_eq!(vec!["P1"], info.shared_paths);
        assert_eq!("s → a → b → t", info.route_description);
        assert!(info.edge_details[1].is_bottleneck);
        assert_relative_eq!(0.5, info.edge_details[0].utilization);
    }

    #[test]
    fn test_edge_info() {
        let mut c = shared_trunk();
        c.set_path_flow("P1", 4.0).unwrap();
        c.set_path_flow("P2", 4.0).unwrap();
        let info = c.get_edge_info("e0").unwrap();
        assert_relative_eq!(8.0, info.current_flow);
        assert_relative_eq!(2.0, info.available_capacity);
        assert_eq!(EdgeStatus::High, info.status);
        assert_eq!(2, info.path_count);
        assert_eq!(1, info.using_paths[0].path_position);
        assert!(!info.is_critical);

        let info = c.get_edge_info("e1").unwrap();
        assert_eq!(vec!["P1"], info.bottleneck_for);
        assert!(info.is_critical);
        assert_eq!(2, info.using_paths[0].total_edges);
    }
}
