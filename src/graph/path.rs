use crate::graph::edge::{Edge, EdgeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PathId(pub usize);

impl PathId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bottleneck {
    pub capacity: f64,
    pub edge: EdgeId,
}

#[derive(Debug, Clone)]
pub struct Path {
    id: PathId,
    name: String,
    /// non-empty, connected and simple; checked by the network on insertion
    edges: Vec<EdgeId>,
    /// current_flow >= 0.0
    current_flow: f64,
    /// last computed bottleneck, refreshed on demand only
    bottleneck: Option<Bottleneck>,
}

impl Path {
    pub(crate) fn new(id: PathId, name: impl Into<String>, edges: Vec<EdgeId>) -> Self {
        Self {
            id,
            name: name.into(),
            edges,
            current_flow: 0.0,
            bottleneck: None,
        }
    }

    pub fn id(&self) -> PathId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    pub fn current_flow(&self) -> f64 {
        self.current_flow
    }

    pub fn uses_edge(&self, edge: EdgeId) -> bool {
        self.edges.contains(&edge)
    }

    pub fn cached_bottleneck(&self) -> Option<Bottleneck> {
        self.bottleneck
    }

    /// Minimum capacity along the path. Ties go to the edge that comes first.
    pub fn bottleneck(&self, edges: &[Edge]) -> Bottleneck {
        let first = self.edges[0];
        self.edges.iter().skip(1).fold(
            Bottleneck {
                capacity: edges[first.index()].capacity(),
                edge: first,
            },
            |best, id| {
                let capacity = edges[id.index()].capacity();
                if capacity < best.capacity {
                    Bottleneck { capacity, edge: *id }
                } else {
                    best
                }
            },
        )
    }

    pub(crate) fn refresh_bottleneck(&mut self, edges: &[Edge]) -> Bottleneck {
        let bottleneck = self.bottleneck(edges);
        self.bottleneck = Some(bottleneck);
        bottleneck
    }

    pub(crate) fn set_flow(&mut self, flow: f64) {
        self.current_flow = flow.max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::node::NodeId;
    use approx::assert_relative_eq;

    fn edges(capacities: &[f64]) -> Vec<Edge> {
        capacities
            .iter()
            .enumerate()
            .map(|(i, c)| Edge::new(EdgeId(i), format!("e{}", i), NodeId(i), NodeId(i + 1), *c))
            .collect()
    }

    #[test]
    fn test_bottleneck_is_minimum_capacity() {
        let edges = edges(&[10.0, 8.0, 12.0]);
        let path = Path::new(PathId(0), "P1", vec![EdgeId(0), EdgeId(1), EdgeId(2)]);
        let b = path.bottleneck(&edges);
        assert_relative_eq!(8.0, b.capacity);
        assert_eq!(EdgeId(1), b.edge);
    }

    #[test]
    fn test_bottleneck_tie_goes_to_first_edge() {
        let edges = edges(&[9.0, 5.0, 5.0, 7.0]);
        let path = Path::new(
            PathId(0),
            "P1",
            vec![EdgeId(0), EdgeId(1), EdgeId(2), EdgeId(3)],
        );
        assert_eq!(EdgeId(1), path.bottleneck(&edges).edge);
    }

    #[test]
    fn test_refresh_updates_cache() {
        let mut edges = edges(&[4.0, 6.0]);
        let mut path = Path::new(PathId(0), "P1", vec![EdgeId(0), EdgeId(1)]);
        assert!(path.cached_bottleneck().is_none());

        path.refresh_bottleneck(&edges);
        edges[1].fail();
        // stale until refreshed again
        assert_relative_eq!(4.0, path.cached_bottleneck().unwrap().capacity);
        path.refresh_bottleneck(&edges);
        assert_relative_eq!(0.0, path.cached_bottleneck().unwrap().capacity);
        assert_eq!(EdgeId(1), path.cached_bottleneck().unwrap().edge);
    }
}
