use crate::graph::network::{ConservationViolation, NetworkState};
use crate::graph::path::PathId;
use serde::Serialize;
use std::collections::BTreeMap;

/// `current_flow / bottleneck`. A path with no bottleneck capacity reports
/// infinity while it still carries flow, otherwise zero.
pub fn path_utilization(network: &NetworkState, path: PathId) -> f64 {
    let bottleneck = network.bottleneck(path).capacity;
    let flow = network.path_by_id(path).current_flow();
    if bottleneck > 0.0 {
        flow / bottleneck
    } else if flow > 0.0 {
        f64::INFINITY
    } else {
        0.0
    }
}

pub fn path_utilizations(network: &NetworkState) -> BTreeMap<String, f64> {
    network
        .paths()
        .iter()
        .map(|p| (p.name().to_string(), path_utilization(network, p.id())))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapacityOverload {
    pub edge: String,
    pub flow: f64,
    pub capacity: f64,
    pub violation: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub conservation_violations: Vec<ConservationViolation>,
    pub capacity_overloads: Vec<CapacityOverload>,
    pub total_throughput: f64,
    pub path_utilizations: BTreeMap<String, f64>,
    pub is_valid: bool,
    pub has_overloads: bool,
}

impl ValidationReport {
    pub fn collect(network: &NetworkState) -> Self {
        let conservation_violations = network.validate_flow_conservation();
        // zero-capacity edges that still carry flow count as overloaded
        let capacity_overloads = network
            .edges()
            .iter()
            .filter_map(|e| {
                let flow = network.edge_flow(e.id());
                (flow > e.capacity()).then(|| CapacityOverload {
                    edge: e.name().to_string(),
                    flow,
                    capacity: e.capacity(),
                    violation: flow - e.capacity(),
                })
            })
            .collect::<Vec<_>>();
        Self {
            is_valid: conservation_violations.is_empty(),
            has_overloads: !capacity_overloads.is_empty(),
            conservation_violations,
            capacity_overloads,
            total_throughput: network.total_throughput(),
            path_utilizations: path_utilizations(network),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathDetail {
    pub path: String,
    pub edges: Vec<String>,
    pub length: usize,
    pub bottleneck_capacity: f64,
    pub bottleneck_edge: String,
}

/// Static view of the path set: how long the paths are, how much each could
/// carry on its own, and which edges they compete for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathSetAnalysis {
    pub path_count: usize,
    pub details: Vec<PathDetail>,
    pub total_bottleneck_capacity: f64,
    pub average_bottleneck: f64,
    pub min_bottleneck: f64,
    pub max_bottleneck: f64,
    pub shared_edges: BTreeMap<String, Vec<String>>,
    /// edges used by more than one path
    pub highly_shared_edges: BTreeMap<String, Vec<String>>,
}

impl PathSetAnalysis {
    pub fn path_lengths(&self) -> Vec<usize> {
        self.details.iter().map(|d| d.length).collect()
    }

    pub fn bottleneck_capacities(&self) -> Vec<f64> {
        self.details.iter().map(|d| d.bottleneck_capacity).collect()
    }
}

/// `None` when the network has no paths.
pub fn analyze_paths(network: &NetworkState) -> Option<PathSetAnalysis> {
    if network.paths().is_empty() {
        return None;
    }
    let edge_name = |id| network.edge_by_id(id).name().to_string();

    let details = network
        .paths()
        .iter()
        .map(|p| {
            let bottleneck = network.bottleneck(p.id());
            PathDetail {
                path: p.name().to_string(),
                edges: p.edges().iter().map(|e| edge_name(*e)).collect(),
                length: p.edges().len(),
                bottleneck_capacity: bottleneck.capacity,
                bottleneck_edge: edge_name(bottleneck.edge),
            }
        })
        .collect::<Vec<_>>();

    let capacities = details.iter().map(|d| d.bottleneck_capacity);
    let total = capacities.clone().sum::<f64>();
    let min = capacities.clone().fold(f64::INFINITY, f64::min);
    let max = capacities.fold(f64::NEG_INFINITY, f64::max);

    let shared_edges = network
        .edges()
        .iter()
        .filter(|e| !network.paths_using(e.id()).is_empty())
        .map(|e| {
            let users = network
                .paths_using(e.id())
                .iter()
                .map(|p| network.path_by_id(*p).name().to_string())
                .collect::<Vec<_>>();
            (e.name().to_string(), users)
        })
        .collect::<BTreeMap<_, _>>();
    let highly_shared_edges = shared_edges
        .iter()
        .filter(|(_, users)| users.len() > 1)
        .map(|(edge, users)| (edge.clone(), users.clone()))
        .collect();

    Some(PathSetAnalysis {
        path_count: details.len(),
        total_bottleneck_capacity: total,
        average_bottleneck: total / details.len() as f64,
        min_bottleneck: min,
        max_bottleneck: max,
        details,
        shared_edges,
        highly_shared_edges,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::NetworkBuilder;
    use approx::assert_relative_eq;

    fn reference() -> NetworkState {
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
            .unwrap()
    }

    //  s → a → t
    //      ↓   ↑
    //      b ──┘
    fn shared_trunk() -> NetworkState {
        NetworkBuilder::from_edge_list(
            &[("s", "a", 10.0), ("a", "t", 4.0), ("a", "b", 5.0), ("b", "t", 7.0)],
            "s",
            "t",
        )
        .build()
        .unwrap()
    }

    #[test]
    fn test_utilization_of_idle_and_blocked_paths() {
        let mut n = reference();
        let p1 = n.path_id("P1").unwrap();
        assert_relative_eq!(0.0, path_utilization(&n, p1));

        n.path_by_id_mut(p1).set_flow(4.0);
        assert_relative_eq!(0.5, path_utilization(&n, p1));

        n.edge_mut("e2").unwrap().fail();
        assert_eq!(f64::INFINITY, path_utilization(&n, p1));
    }

    #[test]
    fn test_clean_report() {
        let mut n = reference();
        let p2 = n.path_id("P2").unwrap();
        n.path_by_id_mut(p2).set_flow(3.0);
        let report = ValidationReport::collect(&n);
        assert!(report.is_valid);
        assert!(!report.has_overloads);
        assert_relative_eq!(3.0, report.total_throughput);
        assert_relative_eq!(0.5, report.path_utilizations["P2"]);
    }

    #[test]
    fn test_report_flags_overload_on_failed_edge() {
        let mut n = reference();
        let p1 = n.path_id("P1").unwrap();
        n.path_by_id_mut(p1).set_flow(5.0);
        n.edge_mut("e1").unwrap().fail();
        let report = ValidationReport::collect(&n);
        assert!(report.has_overloads);
        assert_eq!(
            vec![CapacityOverload {
                edge: "e1".to_string(),
                flow: 5.0,
                capacity: 0.0,
                violation: 5.0
            }],
            report.capacity_overloads
        );
    }

    #[test]
    fn test_analyze_paths_reports_sharing() {
        let n = shared_trunk();
        let analysis = analyze_paths(&n).unwrap();
        assert_eq!(2, analysis.path_count);
        assert_eq!(vec![2, 3], analysis.path_lengths());
        assert_eq!(vec![4.0, 5.0], analysis.bottleneck_capacities());
        assert_relative_eq!(9.0, analysis.total_bottleneck_capacity);
        assert_relative_eq!(4.5, analysis.average_bottleneck);
        assert_relative_eq!(4.0, analysis.min_bottleneck);
        assert_relative_eq!(5.0, analysis.max_bottleneck);
        assert_eq!(
            vec!["P1".to_string(), "P2".to_string()],
            analysis.highly_shared_edges["e0"]
        );
        assert_eq!(1, analysis.highly_shared_edges.len());
        assert_eq!(4, analysis.shared_edges.len());
    }

    #[test]
    fn test_analyze_paths_bottleneck_edge_names() {
        let n = reference();
        let analysis = analyze_paths(&n).unwrap();
        assert_eq!("e2", analysis.details[0].bottleneck_edge);
        assert_eq!("e3", analysis.details[1].bottleneck_edge);
    }
}
