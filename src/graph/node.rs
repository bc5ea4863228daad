use crate::error::BuildError;
use crate::graph::edge::EdgeId;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Source,
    Intermediate,
    Sink,
}

impl NodeKind {
    pub fn parse(node: &str, kind: &str) -> Result<Self, BuildError> {
        match kind.to_lowercase().as_str() {
            "source" => Ok(NodeKind::Source),
            "intermediate" => Ok(NodeKind::Intermediate),
            "sink" => Ok(NodeKind::Sink),
            _ => Err(BuildError::UnknownNodeKind {
                node: node.to_string(),
                kind: kind.to_string(),
            }),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Source => write!(f, "source"),
            NodeKind::Intermediate => write!(f, "intermediate"),
            NodeKind::Sink => write!(f, "sink"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    name: String,
    kind: NodeKind,
    /// membership only, edges are owned by the network
    incoming: Vec<EdgeId>,
    outgoing: Vec<EdgeId>,
}

impl Node {
    pub fn new(id: NodeId, name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            incoming: Vec::new(),
            outgoing: Vec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn incoming(&self) -> &[EdgeId] {
        &self.incoming
    }

    pub fn outgoing(&self) -> &[EdgeId] {
        &self.outgoing
    }

    pub(crate) fn add_incoming(&mut self, edge: EdgeId) {
        if !self.incoming.contains(&edge) {
            self.incoming.push(edge);
        }
    }

    pub(crate) fn add_outgoing(&mut self, edge: EdgeId) {
        if !self.outgoing.contains(&edge) {
            self.outgoing.push(edge);
        }
    }
}
