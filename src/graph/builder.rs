use crate::analysis::enumerator::{EnumerationLimits, PathEnumerator};
use crate::error::BuildError;
use crate::graph::network::NetworkState;
use crate::graph::node::NodeKind;
use tracing::{info, warn};

enum PathPlan {
    Explicit(Vec<(String, Vec<String>)>),
    Enumerate(EnumerationLimits),
}

/// Assembles a `NetworkState` and checks it is a usable s-t network.
pub struct NetworkBuilder {
    nodes: Vec<(String, NodeKind)>,
    edges: Vec<(String, String, String, f64)>,
    plan: PathPlan,
}

impl Default for NetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkBuilder {
    /// Paths are enumerated without limits unless explicit paths or
    /// limits are supplied.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            plan: PathPlan::Enumerate(EnumerationLimits::unbounded()),
        }
    }

    /// Nodes are inferred from the edges; edges are named `e0`, `e1`, ...
    pub fn from_edge_list(edges: &[(&str, &str, f64)], source: &str, sink: &str) -> Self {
        let mut builder = Self::new();
        edges
            .iter()
            .flat_map(|(from, to, _)| [*from, *to])
            .for_each(|node| {
                if builder.nodes.iter().all(|(n, _)| n != node) {
                    let kind = if node == source {
                        NodeKind::Source
                    } else if node == sink {
                        NodeKind::Sink
                    } else {
                        NodeKind::Intermediate
                    };
                    builder.nodes.push((node.to_string(), kind));
                }
            });
        edges.iter().enumerate().fold(builder, |b, (i, (from, to, capacity))| {
            b.edge(&format!("e{}", i), from, to, *capacity)
        })
    }

    pub fn node(mut self, name: &str, kind: NodeKind) -> Self {
        self.nodes.push((name.to_string(), kind));
        self
    }

    pub fn source(self, name: &str) -> Self {
        self.node(name, NodeKind::Source)
    }

    pub fn intermediate(self, name: &str) -> Self {
        self.node(name, NodeKind::Intermediate)
    }

    pub fn sink(self, name: &str) -> Self {
        self.node(name, NodeKind::Sink)
    }

    pub fn edge(mut self, name: &str, from: &str, to: &str, capacity: f64) -> Self {
        self.edges
            .push((name.to_string(), from.to_string(), to.to_string(), capacity));
        self
    }

    /// Switches to explicit paths; enumeration is no longer performed.
    pub fn path(mut self, name: &str, edges: &[&str]) -> Self {
        let edges = edges.iter().map(|e| e.to_string()).collect();
        if let PathPlan::Explicit(paths) = &mut self.plan {
            paths.push((name.to_string(), edges));
        } else {
            self.plan = PathPlan::Explicit(vec![(name.to_string(), edges)]);
        }
        self
    }

    /// Paths named `P1`, `P2`, ... in discovery order.
    pub fn enumerate_paths(mut self, limits: EnumerationLimits) -> Self {
        self.plan = PathPlan::Enumerate(limits);
        self
    }

    pub fn build(self) -> Result<NetworkState, BuildError> {
        let mut network = NetworkState::new();
        for (name, kind) in &self.nodes {
            network.add_node(name, *kind)?;
        }
        if network.source().is_none() {
            return Err(BuildError::MissingSource);
        }
        if network.sink().is_none() {
            return Err(BuildError::MissingSink);
        }
        for (name, from, to, capacity) in &self.edges {
            network.add_edge(name, from, to, *capacity)?;
        }

        match self.plan {
            PathPlan::Explicit(paths) => {
                for (name, edges) in &paths {
                    network.add_path(name, edges.as_slice())?;
                }
            }
            PathPlan::Enumerate(limits) => {
                if limits.max_paths == Some(0) {
                    return Err(BuildError::ZeroPathLimit);
                }
                let result = PathEnumerator::new(&network).enumerate_all_paths(limits);
                if result.total_paths_found() == 0 && !result.is_complete() {
                    return Err(BuildError::NoPathsWithinLimits {
                        max_length: limits.max_length,
                        max_paths: limits.max_paths,
                    });
                }
                if !result.is_complete() {
                    warn!(
                        found = result.total_paths_found(),
                        max_length = ?limits.max_length,
                        max_paths = ?limits.max_paths,
                        "path enumeration truncated by limits"
                    );
                }
                for (i, edges) in result.into_paths().into_iter().enumerate() {
                    network.insert_path(&format!("P{}", i + 1), edges)?;
                }
            }
        }
        if network.paths().is_empty() {
            return Err(BuildError::Disconnected);
        }

        info!(
            nodes = network.node_count(),
            edges = network.edges().len(),
            paths = network.paths().len(),
            "network built"
        );
        Ok(network)
    }
}
