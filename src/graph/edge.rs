use super::node::NodeId;

use std::collections::HashSet;

/// A directed, costed edge
/// Invariant: cost is finite and non-negative (the parser rejects anything else)
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub cost: f64,
}

impl Edge {
    pub fn new(from: impl Into<NodeId>, to: impl Into<NodeId>, cost: f64) -> Self {
        Edge {
            from: from.into(),
            to: to.into(),
            cost,
        }
    }

    /// The direction-aware key used for visited marks
    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(self.from.clone(), self.to.clone())
    }

    /// Check if this edge leaves `from` and arrives at `to`
    pub fn connects(&self, from: &NodeId, to: &NodeId) -> bool {
        &self.from == from && &self.to == to
    }
}

/// Identifies a directed edge by its endpoints
/// (a, b) and (b, a) are different keys
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EdgeKey {
    pub from: NodeId,
    pub to: NodeId,
}

impl EdgeKey {
    pub fn new(from: NodeId, to: NodeId) -> Self {
        EdgeKey { from, to }
    }
}

/// Edges marked as traversed
/// Maintains both the set of keys and the order in which they were visited
#[derive(Debug, Clone, Default)]
pub struct VisitedEdges {
    /// Set for O(1) membership checks
    keys: HashSet<EdgeKey>,
    /// Keys in the order they were visited
    visit_order: Vec<EdgeKey>,
}

impl VisitedEdges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an edge as visited
    /// Returns true if the edge was newly marked, false if it was already visited
    pub fn mark(&mut self, key: EdgeKey) -> bool {
        if self.keys.insert(key.clone()) {
            self.visit_order.push(key);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, key: &EdgeKey) -> bool {
        self.keys.contains(key)
    }

    /// Check by endpoints
    pub fn contains_pair(&self, from: &NodeId, to: &NodeId) -> bool {
        self.keys.contains(&EdgeKey::new(from.clone(), to.clone()))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Get keys in visit order
    pub fn in_order(&self) -> &[EdgeKey] {
        &self.visit_order
    }

    /// The most recently visited edge, if any
    pub fn last(&self) -> Option<&EdgeKey> {
        self.visit_order.last()
    }

    pub fn clear(&mut self) {
        self.keys.clear();
        self.visit_order.clear();
    }
}
