use std::collections::HashSet;
use std::fmt;

/// Identifier of a graph node: the exact token that appeared in the input
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(name: impl Into<String>) -> Self {
        NodeId(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(name: &str) -> Self {
        NodeId(name.to_string())
    }
}

impl From<String> for NodeId {
    fn from(name: String) -> Self {
        NodeId(name)
    }
}

/// Accumulates node ids in order of first appearance, without duplicates
#[derive(Debug, Clone, Default)]
pub struct NodeSetBuilder {
    seen: HashSet<NodeId>,
    order: Vec<NodeId>,
}

impl NodeSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the node was not seen before
    pub fn add(&mut self, node: &NodeId) -> bool {
        if self.seen.insert(node.clone()) {
            self.order.push(node.clone());
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn build(self) -> Vec<NodeId> {
        self.order
    }
}
