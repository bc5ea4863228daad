use crate::error::BuildError;
use crate::graph::edge::{Edge, EdgeId};
use crate::graph::node::{Node, NodeId, NodeKind};
use crate::graph::path::{Bottleneck, Path, PathId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Inflow/outflow tolerance at intermediate nodes.
pub const CONSERVATION_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConservationViolation {
    pub node: String,
    pub imbalance: f64,
}

/// The whole s-t network: topology, predefined paths and per-path flows.
/// Nodes, edges and paths are never removed once added.
#[derive(Debug, Clone, Default)]
pub struct NetworkState {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    paths: Vec<Path>,
    node_index: HashMap<String, NodeId>,
    edge_index: HashMap<String, EdgeId>,
    path_index: HashMap<String, PathId>,
    /// paths routed over each edge, indexed by edge
    edge_paths: Vec<Vec<PathId>>,
    source: Option<NodeId>,
    sink: Option<NodeId>,
    total_flow: f64,
    throughput_history: Vec<f64>,
}

impl NetworkState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, name: &str, kind: NodeKind) -> Result<NodeId, BuildError> {
        if self.node_index.contains_key(name) {
            return Err(BuildError::DuplicateNode(name.to_string()));
        }
        match kind {
            NodeKind::Source => {
                if let Some(existing) = self.source {
                    return Err(BuildError::MultipleSources(
                        self.node_by_id(existing).name().to_string(),
                        name.to_string(),
                    ));
                }
            }
            NodeKind::Sink => {
                if let Some(existing) = self.sink {
                    return Err(BuildError::MultipleSinks(
                        self.node_by_id(existing).name().to_string(),
                        name.to_string(),
                    ));
                }
            }
            NodeKind::Intermediate => {}
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(id, name, kind));
        self.node_index.insert(name.to_string(), id);
        match kind {
            NodeKind::Source => self.source = Some(id),
            NodeKind::Sink => self.sink = Some(id),
            NodeKind::Intermediate => {}
        }
        Ok(id)
    }

    pub fn add_edge(
        &mut self,
        name: &str,
        from: &str,
        to: &str,
        capacity: f64,
    ) -> Result<EdgeId, BuildError> {
        if self.edge_index.contains_key(name) {
            return Err(BuildError::DuplicateEdge(name.to_string()));
        }
        if !capacity.is_finite() || capacity < 0.0 {
            return Err(BuildError::InvalidCapacity {
                edge: name.to_string(),
                capacity,
            });
        }
        let lookup = |node: &str| {
            self.node_id(node).ok_or_else(|| BuildError::UnknownNode {
                edge: name.to_string(),
                node: node.to_string(),
            })
        };
        let from = lookup(from)?;
        let to = lookup(to)?;

        let id = EdgeId(self.edges.len());
        self.edges.push(Edge::new(id, name, from, to, capacity));
        self.edge_index.insert(name.to_string(), id);
        self.edge_paths.push(Vec::new());
        self.nodes[from.index()].add_outgoing(id);
        self.nodes[to.index()].add_incoming(id);
        Ok(id)
    }

    pub fn add_path<S: AsRef<str>>(&mut self, name: &str, edges: &[S]) -> Result<PathId, BuildError> {
        let ids = edges
            .iter()
            .map(|e| {
                self.edge_id(e.as_ref()).ok_or_else(|| BuildError::UnknownEdge {
                    path: name.to_string(),
                    edge: e.as_ref().to_string(),
                })
            })
            .collect::<Result<Vec<EdgeId>, BuildError>>()?;
        self.insert_path(name, ids)
    }

    pub(crate) fn insert_path(&mut self, name: &str, edges: Vec<EdgeId>) -> Result<PathId, BuildError> {
        if self.path_index.contains_key(name) {
            return Err(BuildError::DuplicatePath(name.to_string()));
        }
        let (Some(&first), Some(&last)) = (edges.first(), edges.last()) else {
            return Err(BuildError::EmptyPath(name.to_string()));
        };
        let source = self.source.ok_or(BuildError::MissingSource)?;
        let sink = self.sink.ok_or(BuildError::MissingSink)?;
        if self.edge_by_id(first).from() != source || self.edge_by_id(last).to() != sink {
            return Err(BuildError::PathEndpoints(name.to_string()));
        }

        let mut visited = vec![false; self.nodes.len()];
        visited[source.index()] = true;
        for (i, id) in edges.iter().enumerate() {
            let edge = self.edge_by_id(*id);
            if i > 0 {
                let prev = self.edge_by_id(edges[i - 1]);
                if prev.to() != edge.from() {
                    return Err(BuildError::BrokenPath {
                        path: name.to_string(),
                        prev: prev.name().to_string(),
                        next: edge.name().to_string(),
                    });
                }
            }
            if visited[edge.to().index()] {
                return Err(BuildError::NonSimplePath {
                    path: name.to_string(),
                    node: self.node_by_id(edge.to()).name().to_string(),
                });
            }
            visited[edge.to().index()] = true;
        }

        let id = PathId(self.paths.len());
        edges
            .iter()
            .for_each(|e| self.edge_paths[e.index()].push(id));
        self.paths.push(Path::new(id, name, edges));
        self.path_index.insert(name.to_string(), id);
        Ok(id)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    pub fn node_by_id(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn edge_by_id(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    pub fn edge_by_id_mut(&mut self, id: EdgeId) -> &mut Edge {
        &mut self.edges[id.index()]
    }

    pub fn path_by_id(&self, id: PathId) -> &Path {
        &self.paths[id.index()]
    }

    pub(crate) fn path_by_id_mut(&mut self, id: PathId) -> &mut Path {
        &mut self.paths[id.index()]
    }

    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.node_index.get(name).copied()
    }

    pub fn edge_id(&self, name: &str) -> Option<EdgeId> {
        self.edge_index.get(name).copied()
    }

    pub fn path_id(&self, name: &str) -> Option<PathId> {
        self.path_index.get(name).copied()
    }

    pub fn edge(&self, name: &str) -> Option<&Edge> {
        self.edge_id(name).map(|id| self.edge_by_id(id))
    }

    /// Direct access for fault injection; `FlowController::handle_failed_edges`
    /// reconciles path flows afterwards.
    pub fn edge_mut(&mut self, name: &str) -> Option<&mut Edge> {
        self.edge_id(name).map(|id| self.edge_by_id_mut(id))
    }

    pub fn path(&self, name: &str) -> Option<&Path> {
        self.path_id(name).map(|id| self.path_by_id(id))
    }

    pub fn source(&self) -> Option<NodeId> {
        self.source
    }

    pub fn sink(&self) -> Option<NodeId> {
        self.sink
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn paths_using(&self, edge: EdgeId) -> &[PathId] {
        &self.edge_paths[edge.index()]
    }

    /// Aggregate flow on an edge, derived from the paths routed over it.
    pub fn edge_flow(&self, edge: EdgeId) -> f64 {
        self.paths_using(edge)
            .iter()
            .map(|p| self.path_by_id(*p).current_flow())
            .sum()
    }

    pub fn bottleneck(&self, path: PathId) -> Bottleneck {
        self.path_by_id(path).bottleneck(&self.edges)
    }

    pub(crate) fn refresh_bottleneck(&mut self, path: PathId) -> Bottleneck {
        let edges = &self.edges;
        self.paths[path.index()].refresh_bottleneck(edges)
    }

    pub fn total_throughput(&self) -> f64 {
        self.sink
            .map(|sink| {
                self.node_by_id(sink)
                    .incoming()
                    .iter()
                    .map(|e| self.edge_flow(*e))
                    .sum()
            })
            .unwrap_or(0.0)
    }

    /// Flow into the sink; also stored as `total_flow`.
    pub fn calculate_total_throughput(&mut self) -> f64 {
        self.total_flow = self.total_throughput();
        self.total_flow
    }

    pub fn total_flow(&self) -> f64 {
        self.total_flow
    }

    pub fn record_throughput(&mut self, throughput: f64) {
        self.throughput_history.push(throughput);
    }

    pub fn throughput_history(&self) -> &[f64] {
        &self.throughput_history
    }

    pub fn validate_flow_conservation(&self) -> Vec<ConservationViolation> {
        self.nodes
            .iter()
            .filter(|n| n.kind() == NodeKind::Intermediate)
            .filter_map(|n| {
                let inflow: f64 = n.incoming().iter().map(|e| self.edge_flow(*e)).sum();
                let outflow: f64 = n.outgoing().iter().map(|e| self.edge_flow(*e)).sum();
                let imbalance = (inflow - outflow).abs();
                (imbalance >= CONSERVATION_TOLERANCE).then(|| ConservationViolation {
                    node: n.name().to_string(),
                    imbalance,
                })
            })
            .collect()
    }
}

impl fmt::Display for NetworkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name_of = |id: Option<NodeId>| {
            id.map(|id| self.node_by_id(id).name().to_string())
                .unwrap_or_else(|| "-".to_string())
        };
        writeln!(f, "Network State:")?;
        writeln!(
            f,
            "  Nodes: {} (Source: {}, Sink: {})",
            self.nodes.len(),
            name_of(self.source),
            name_of(self.sink)
        )?;
        writeln!(f, "  Edges: {}", self.edges.len())?;
        writeln!(f, "  Paths: {}", self.paths.len())?;
        write!(f, "  Total Flow: {:.2}", self.total_flow)
    }
}
