use crate::graph::edge::EdgeId;
use crate::graph::network::NetworkState;
use crate::graph::node::NodeId;
use std::collections::VecDeque;

/// Residual capacities below this are treated as exhausted.
const EPSILON: f64 = 1e-9;

#[derive(Debug, Clone)]
pub struct MaxFlowResult {
    value: f64,
    cut_edges: Vec<EdgeId>,
    source_side: Vec<NodeId>,
    edge_flows: Vec<f64>,
}

impl MaxFlowResult {
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Edges leaving the source side of the minimum cut.
    pub fn cut_edges(&self) -> &[EdgeId] {
        &self.cut_edges
    }

    pub fn source_side(&self) -> &[NodeId] {
        &self.source_side
    }

    /// Flow on each edge in the optimum, indexed by edge.
    pub fn edge_flow(&self, edge: EdgeId) -> f64 {
        self.edge_flows[edge.index()]
    }
}

#[derive(Debug, Clone)]
struct Arc {
    to: usize,
    residual: f64,
    rev: usize,
}

struct Residual {
    adj: Vec<Vec<Arc>>,
    /// (node, arc index) of each network edge's forward arc
    forward: Vec<Option<(usize, usize)>>,
}

impl Residual {
    fn build(network: &NetworkState) -> Self {
        let mut adj: Vec<Vec<Arc>> = vec![Vec::new(); network.node_count()];
        let forward = network
            .edges()
            .iter()
            .map(|e| {
                let (from, to) = (e.from().index(), e.to().index());
                if from == to {
                    return None;
                }
                let capacity = if e.is_failed() { 0.0 } else { e.capacity() };
                let (fi, bi) = (adj[from].len(), adj[to].len());
                adj[from].push(Arc {
                    to,
                    residual: capacity,
                    rev: bi,
                });
                adj[to].push(Arc {
                    to: from,
                    residual: 0.0,
                    rev: fi,
                });
                Some((from, fi))
            })
            .collect();
        Self { adj, forward }
    }

    fn levels(&self, source: usize) -> Vec<Option<usize>> {
        let mut level = vec![None; self.adj.len()];
        level[source] = Some(0);
        let mut queue = VecDeque::from([source]);
        while let Some(v) = queue.pop_front() {
            let next = level[v].map(|l| l + 1);
            for arc in &self.adj[v] {
                if arc.residual > EPSILON && level[arc.to].is_none() {
                    level[arc.to] = next;
                    queue.push_back(arc.to);
                }
            }
        }
        level
    }

    fn push(
        &mut self,
        v: usize,
        sink: usize,
        limit: f64,
        level: &[Option<usize>],
        cursor: &mut [usize],
    ) -> f64 {
        if v == sink {
            return limit;
        }
        while cursor[v] < self.adj[v].len() {
            let Arc { to, residual, rev } = self.adj[v][cursor[v]].clone();
            let deeper = match (level[v], level[to]) {
                (Some(lv), Some(lt)) => lt == lv + 1,
                _ => false,
            };
            if residual > EPSILON && deeper {
                let pushed = self.push(to, sink, limit.min(residual), level, cursor);
                if pushed > EPSILON {
                    self.adj[v][cursor[v]].residual -= pushed;
                    self.adj[to][rev].residual += pushed;
                    return pushed;
                }
            }
            cursor[v] += 1;
        }
        0.0
    }

    /// Dinic's algorithm.
    fn saturate(&mut self, source: usize, sink: usize) -> f64 {
        let mut total = 0.0;
        loop {
            let level = self.levels(source);
            if level[sink].is_none() {
                return total;
            }
            let mut cursor = vec![0; self.adj.len()];
            loop {
                let pushed = self.push(source, sink, f64::INFINITY, &level, &mut cursor);
                if pushed <= EPSILON {
                    break;
                }
                total += pushed;
            }
        }
    }
}

/// Theoretical s-t ceiling for the current capacities. Read-only: used for
/// reporting, never for accepting or rejecting flow changes.
pub struct MaxFlowOracle<'a> {
    network: &'a NetworkState,
}

impl<'a> MaxFlowOracle<'a> {
    pub fn new(network: &'a NetworkState) -> Self {
        Self { network }
    }

    pub fn solve(&self) -> MaxFlowResult {
        let edge_count = self.network.edges().len();
        let (Some(source), Some(sink)) = (self.network.source(), self.network.sink()) else {
            return MaxFlowResult {
                value: 0.0,
                cut_edges: Vec::new(),
                source_side: Vec::new(),
                edge_flows: vec![0.0; edge_count],
            };
        };

        let mut residual = Residual::build(self.network);
        let value = residual.saturate(source.index(), sink.index());

        let reachable = residual.levels(source.index());
        let in_source_side = |n: NodeId| reachable[n.index()].is_some();
        let source_side = self
            .network
            .nodes()
            .iter()
            .map(|n| n.id())
            .filter(|id| in_source_side(*id))
            .collect();
        let cut_edges = self
            .network
            .edges()
            .iter()
            .filter(|e| in_source_side(e.from()) && !in_source_side(e.to()))
            .filter(|e| !e.is_failed() && e.capacity() > 0.0)
            .map(|e| e.id())
            .collect();
        let edge_flows = self
            .network
            .edges()
            .iter()
            .zip(&residual.forward)
            .map(|(e, fwd)| match fwd {
                Some((node, arc)) => {
                    let capacity = if e.is_failed() { 0.0 } else { e.capacity() };
                    (capacity - residual.adj[*node][*arc].residual).max(0.0)
                }
                None => 0.0,
            })
            .collect();

        MaxFlowResult {
            value,
            cut_edges,
            source_side,
            edge_flows,
        }
    }

    pub fn max_flow_value(&self) -> f64 {
        self.solve().value()
    }

    /// Sum of path bottlenecks: what the predefined paths could carry if they
    /// shared no edges.
    pub fn path_based_max_flow(&self) -> f64 {
        self.network
            .paths()
            .iter()
            .map(|p| self.network.bottleneck(p.id()).capacity)
            .sum()
    }
}
