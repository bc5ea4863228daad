use crate::graph::edge::EdgeId;
use crate::graph::network::NetworkState;
use crate::graph::node::NodeId;
use serde::{Deserialize, Serialize};
use std::ops::ControlFlow;
use std::time::{Duration, Instant};

/// Safety valve for the exponential search. `None` means unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumerationLimits {
    /// maximum number of edges in a path, inclusive
    pub max_length: Option<usize>,
    pub max_paths: Option<usize>,
}

impl EnumerationLimits {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn new(max_length: Option<usize>, max_paths: Option<usize>) -> Self {
        Self {
            max_length,
            max_paths,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EnumerationResult {
    paths: Vec<Vec<EdgeId>>,
    elapsed: Duration,
    is_complete: bool,
    limits: EnumerationLimits,
}

impl EnumerationResult {
    pub fn paths(&self) -> &[Vec<EdgeId>] {
        &self.paths
    }

    pub fn into_paths(self) -> Vec<Vec<EdgeId>> {
        self.paths
    }

    pub fn total_paths_found(&self) -> usize {
        self.paths.len()
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// False when a limit cut the search short. A depth cut counts even if
    /// the pruned branch could never have reached the sink, so this errs
    /// towards false; it is never true for a truncated search.
    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    pub fn limits(&self) -> EnumerationLimits {
        self.limits
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComplexityEstimate {
    pub paths: usize,
    pub nodes: usize,
    pub edges: usize,
}

/// Depth-first enumeration of simple source→sink paths.
pub struct PathEnumerator<'a> {
    network: &'a NetworkState,
}

impl<'a> PathEnumerator<'a> {
    pub fn new(network: &'a NetworkState) -> Self {
        Self { network }
    }

    pub fn enumerate_all_paths(&self, limits: EnumerationLimits) -> EnumerationResult {
        let started = Instant::now();
        let mut paths = Vec::new();
        let mut limit_hit = false;
        let mut pruned = false;

        self.search(limits.max_length, &mut pruned, &mut |trail: &[EdgeId]| {
            if limits.max_paths.is_some_and(|max| paths.len() >= max) {
                limit_hit = true;
                return ControlFlow::Break(());
            }
            paths.push(trail.to_vec());
            ControlFlow::Continue(())
        });

        EnumerationResult {
            paths,
            elapsed: started.elapsed(),
            is_complete: !limit_hit && !pruned,
            limits,
        }
    }

    /// Same search as `enumerate_all_paths` without keeping the paths.
    pub fn count_all_paths(&self, max_length: Option<usize>) -> usize {
        let mut count = 0;
        let mut pruned = false;
        self.search(max_length, &mut pruned, &mut |_: &[EdgeId]| {
            count += 1;
            ControlFlow::Continue(())
        });
        count
    }

    pub fn estimate_complexity(&self) -> ComplexityEstimate {
        ComplexityEstimate {
            paths: self.count_all_paths(None),
            nodes: self.network.node_count(),
            edges: self.network.edges().len(),
        }
    }

    fn search<F>(&self, max_length: Option<usize>, pruned: &mut bool, visit: &mut F)
    where
        F: FnMut(&[EdgeId]) -> ControlFlow<()>,
    {
        let (Some(source), Some(sink)) = (self.network.source(), self.network.sink()) else {
            return;
        };
        let mut visited = vec![false; self.network.node_count()];
        visited[source.index()] = true;
        let mut trail = Vec::new();
        let _ = self.walk(source, sink, &mut trail, &mut visited, max_length, pruned, visit);
    }

    #[allow(clippy::too_many_arguments)]
    fn walk<F>(
        &self,
        node: NodeId,
        sink: NodeId,
        trail: &mut Vec<EdgeId>,
        visited: &mut [bool],
        max_length: Option<usize>,
        pruned: &mut bool,
        visit: &mut F,
    ) -> ControlFlow<()>
    where
        F: FnMut(&[EdgeId]) -> ControlFlow<()>,
    {
        if node == sink {
            return visit(trail);
        }

        let outgoing = self.network.node_by_id(node).outgoing();
        if max_length.is_some_and(|max| trail.len() >= max) {
            if outgoing
                .iter()
                .any(|e| !visited[self.network.edge_by_id(*e).to().index()])
            {
                *pruned = true;
            }
            return ControlFlow::Continue(());
        }

        for edge in outgoing {
            let next = self.network.edge_by_id(*edge).to();
            if visited[next.index()] {
                continue;
            }
            visited[next.index()] = true;
            trail.push(*edge);

            let flow = self.walk(next, sink, trail, visited, max_length, pruned, visit);

            trail.pop();
            visited[next.index()] = false;
            if flow.is_break() {
                return flow;
            }
        }
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::node::NodeKind;

    fn names(network: &NetworkState, path: &[EdgeId]) -> Vec<String> {
        path.iter()
            .map(|e| network.edge_by_id(*e).name().to_string())
            .collect()
    }

    fn reference() -> NetworkState {
        let mut n = NetworkState::new();
        n.add_node("s", NodeKind::Source).unwrap();
        n.add_node("v1", NodeKind::Intermediate).unwrap();
        n.add_node("v2", NodeKind::Intermediate).unwrap();
        n.add_node("t", NodeKind::Sink).unwrap();
        n.add_edge("e1", "s", "v1", 10.0).unwrap();
        n.add_edge("e2", "v1", "t", 8.0).unwrap();
        n.add_edge("e3", "s", "v2", 6.0).unwrap();
        n.add_edge("e4", "v2", "t", 12.0).unwrap();
        n
    }

    //  s → a → t
    //  ↓   ↓   ↑
    //  b ──────┘
    fn diamond_with_cross() -> NetworkState {
        let mut n = NetworkState::new();
        n.add_node("s", NodeKind::Source).unwrap();
        n.add_node("a", NodeKind::Intermediate).unwrap();
        n.add_node("b", NodeKind::Intermediate).unwrap();
        n.add_node("t", NodeKind::Sink).unwrap();
        n.add_edge("e0", "s", "a", 5.0).unwrap();
        n.add_edge("e1", "s", "b", 4.0).unwrap();
        n.add_edge("e2", "a", "t", 6.0).unwrap();
        n.add_edge("e3", "b", "t", 3.0).unwrap();
        n.add_edge("e4", "a", "b", 2.0).unwrap();
        n
    }

    #[test]
    fn test_reference_network_has_two_paths() {
        let n = reference();
        let result = PathEnumerator::new(&n).enumerate_all_paths(EnumerationLimits::unbounded());
        assert!(result.is_complete());
        assert_eq!(2, result.total_paths_found());
        assert_eq!(vec!["e1", "e2"], names(&n, &result.paths()[0]));
        assert_eq!(vec!["e3", "e4"], names(&n, &result.paths()[1]));
    }

    #[test]
    fn test_cross_edge_adds_third_path() {
        let n = diamond_with_cross();
        let result = PathEnumerator::new(&n).enumerate_all_paths(EnumerationLimits::unbounded());
        assert!(result.is_complete());
        let found = result
            .paths()
            .iter()
            .map(|p| names(&n, p))
            .collect::<Vec<_>>();
        assert_eq!(
            vec![
                vec!["e0", "e2"],
                vec!["e0", "e4", "e3"],
                vec!["e1", "e3"]
            ],
            found
        );
    }

    #[test]
    fn test_cycles_do_not_repeat_nodes() {
        let mut n = diamond_with_cross();
        n.add_edge("e5", "b", "a", 2.0).unwrap();
        let result = PathEnumerator::new(&n).enumerate_all_paths(EnumerationLimits::unbounded());
        assert!(result.is_complete());
        assert_eq!(4, result.total_paths_found());
    }

    #[test]
    fn test_max_paths_truncates() {
        let n = diamond_with_cross();
        let result = PathEnumerator::new(&n).enumerate_all_paths(EnumerationLimits::new(None, Some(2)));
        assert_eq!(2, result.total_paths_found());
        assert!(!result.is_complete());
    }

    #[test]
    fn test_max_paths_equal_to_total_is_complete() {
        let n = diamond_with_cross();
        let result = PathEnumerator::new(&n).enumerate_all_paths(EnumerationLimits::new(None, Some(3)));
        assert_eq!(3, result.total_paths_found());
        assert!(result.is_complete());
    }

    #[test]
    fn test_max_length_is_inclusive_and_truncates() {
        let n = diamond_with_cross();
        let result = PathEnumerator::new(&n).enumerate_all_paths(EnumerationLimits::new(Some(2), None));
        assert_eq!(2, result.total_paths_found());
        assert!(!result.is_complete());

        let result = PathEnumerator::new(&n).enumerate_all_paths(EnumerationLimits::new(Some(3), None));
        assert_eq!(3, result.total_paths_found());
        assert!(result.is_complete());
    }

    #[test]
    fn test_depth_cut_into_dead_end_still_marks_incomplete() {
        let mut n = reference();
        n.add_node("d", NodeKind::Intermediate).unwrap();
        n.add_node("x", NodeKind::Intermediate).unwrap();
        n.add_edge("e5", "v1", "d", 1.0).unwrap();
        n.add_edge("e6", "d", "x", 1.0).unwrap();

        let result = PathEnumerator::new(&n).enumerate_all_paths(EnumerationLimits::new(Some(2), None));
        assert_eq!(2, result.total_paths_found());
        assert!(!result.is_complete());
    }

    #[test]
    fn test_count_matches_enumeration() {
        let n = diamond_with_cross();
        let enumerator = PathEnumerator::new(&n);
        assert_eq!(3, enumerator.count_all_paths(None));
        assert_eq!(2, enumerator.count_all_paths(Some(2)));
        assert_eq!(
            ComplexityEstimate {
                paths: 3,
                nodes: 4,
                edges: 5
            },
            enumerator.estimate_complexity()
        );
    }

    #[test]
    fn test_unreachable_sink_yields_nothing() {
        let mut n = NetworkState::new();
        n.add_node("s", NodeKind::Source).unwrap();
        n.add_node("a", NodeKind::Intermediate).unwrap();
        n.add_node("t", NodeKind::Sink).unwrap();
        n.add_edge("e0", "s", "a", 1.0).unwrap();
        n.add_edge("e1", "t", "a", 1.0).unwrap();
        let result = PathEnumerator::new(&n).enumerate_all_paths(EnumerationLimits::unbounded());
        assert_eq!(0, result.total_paths_found());
        assert!(result.is_complete());
    }
}
