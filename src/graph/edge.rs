use crate::graph::node::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub usize);

impl EdgeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A capacitated link. Flow is not stored here: it is always the sum of the
/// flows of the paths routed over the edge (see `NetworkState::edge_flow`).
#[derive(Debug, Clone)]
pub struct Edge {
    id: EdgeId,
    name: String,
    from: NodeId,
    to: NodeId,
    /// capacity >= 0.0, forced to 0.0 while failed
    capacity: f64,
    base_capacity: f64,
    /// taken the first time the edge is disabled through the controller
    original_capacity: Option<f64>,
    failed: bool,
    /// down through `disable_edge`, only `enable_edge` brings it back
    disabled: bool,
}

impl Edge {
    pub fn new(id: EdgeId, name: impl Into<String>, from: NodeId, to: NodeId, capacity: f64) -> Self {
        let capacity = capacity.max(0.0);
        Self {
            id,
            name: name.into(),
            from,
            to,
            capacity,
            base_capacity: capacity,
            original_capacity: None,
            failed: false,
            disabled: false,
        }
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn from(&self) -> NodeId {
        self.from
    }

    pub fn to(&self) -> NodeId {
        self.to
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn base_capacity(&self) -> f64 {
        self.base_capacity
    }

    pub fn original_capacity(&self) -> Option<f64> {
        self.original_capacity
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Failed, or carrying no capacity at all.
    pub fn is_down(&self) -> bool {
        self.failed || self.capacity <= 0.0
    }

    /// Ignored while the edge is failed.
    pub fn set_capacity(&mut self, capacity: f64) {
        if !self.failed {
            self.capacity = capacity.max(0.0);
        }
    }

    pub fn fail(&mut self) {
        self.failed = true;
        self.capacity = 0.0;
    }

    pub fn restore(&mut self) {
        self.failed = false;
        self.disabled = false;
        self.capacity = self.base_capacity;
    }

    pub(crate) fn disable(&mut self) {
        if self.original_capacity.is_none() {
            self.original_capacity = Some(self.capacity);
        }
        self.fail();
        self.disabled = true;
    }

    pub(crate) fn enable(&mut self) -> f64 {
        self.failed = false;
        self.disabled = false;
        self.capacity = self.original_capacity.unwrap_or(self.base_capacity);
        self.capacity
    }

    pub fn utilization(&self, flow: f64) -> f64 {
        if self.capacity <= 0.0 {
            if flow > 0.0 { f64::INFINITY } else { 0.0 }
        } else {
            flow / self.capacity
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn edge(capacity: f64) -> Edge {
        Edge::new(EdgeId(0), "e1", NodeId(0), NodeId(1), capacity)
    }

    #[test]
    fn test_negative_capacity_is_clamped() {
        let e = edge(-3.0);
        assert_relative_eq!(0.0, e.capacity());
        assert!(e.is_down());
    }

    #[test]
    fn test_fail_forces_zero_capacity_and_restore_uses_base() {
        let mut e = edge(10.0);
        e.set_capacity(7.5);
        e.fail();
        assert!(e.is_failed());
        assert_relative_eq!(0.0, e.capacity());

        e.set_capacity(4.0);
        assert_relative_eq!(0.0, e.capacity());

        e.restore();
        assert!(!e.is_failed());
        assert_relative_eq!(10.0, e.capacity());
    }

    #[test]
    fn test_disable_keeps_first_snapshot() {
        let mut e = edge(10.0);
        e.set_capacity(6.0);
        e.disable();
        assert!(e.is_disabled());
        assert_eq!(Some(6.0), e.original_capacity());
        assert_relative_eq!(6.0, e.enable());
        assert!(!e.is_disabled());

        e.set_capacity(9.0);
        e.disable();
        assert_eq!(Some(6.0), e.original_capacity());
        assert_relative_eq!(6.0, e.enable());
    }

    #[test]
    fn test_enable_without_snapshot_falls_back_to_base() {
        let mut e = edge(10.0);
        e.fail();
        assert!(!e.is_disabled());
        assert_relative_eq!(10.0, e.enable());
    }

    #[test]
    fn test_utilization() {
        let mut e = edge(8.0);
        assert_relative_eq!(0.5, e.utilization(4.0));
        e.fail();
        assert_eq!(f64::INFINITY, e.utilization(1.0));
        assert_relative_eq!(0.0, e.utilization(0.0));
    }
}
