// journey/session.rs

use crate::graph::*;
use std::fmt;

use super::snapshot::SnapshotObserver;
use super::traversal::{TickOutcome, Traversal};

/// Why a run request could not produce a runnable graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    /// The final line did not provide `start goal`
    IncompleteGraph,
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::IncompleteGraph => {
                write!(f, "Make sure the final line contains: start_state goal_state")
            }
        }
    }
}

impl std::error::Error for RunError {}

/// One run request - the parsed graph, its shortest path, and the walk along it
#[derive(Debug, Clone)]
pub struct RunSession {
    graph: GraphSpec,
    start: NodeId,
    goal: NodeId,
    paths: ShortestPaths,
    /// Start to goal inclusive; empty when the goal is unreachable
    path: Vec<NodeId>,
    traversal: Traversal,
}

impl RunSession {
    /// Parse `text` and solve it
    ///
    /// The traversal is created Idle; call `begin` to start walking.
    pub fn from_text(text: &str, speed: f32) -> Result<Self, RunError> {
        Self::from_graph(parse(text), speed)
    }

    pub fn from_graph(graph: GraphSpec, speed: f32) -> Result<Self, RunError> {
        let (Some(start), Some(goal)) = (graph.start.clone(), graph.goal.clone()) else {
            return Err(RunError::IncompleteGraph);
        };

        let paths = shortest_paths(&graph.edges, &start, &goal);
        let path = paths.reconstruct(&goal).unwrap_or_default();

        Ok(RunSession {
            graph,
            start,
            goal,
            paths,
            path,
            traversal: Traversal::new(speed),
        })
    }

    // === Query Methods (for Bevy systems to read state) ===

    pub fn graph(&self) -> &GraphSpec {
        &self.graph
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.graph.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.graph.edges
    }

    pub fn start(&self) -> &NodeId {
        &self.start
    }

    pub fn goal(&self) -> &NodeId {
        &self.goal
    }

    pub fn shortest_paths(&self) -> &ShortestPaths {
        &self.paths
    }

    pub fn path(&self) -> &[NodeId] {
        &self.path
    }

    pub fn has_path(&self) -> bool {
        !self.path.is_empty()
    }

    /// Total cost of the shortest path; None when the goal is unreachable
    pub fn path_cost(&self) -> Option<f64> {
        let cost = self.paths.distance(&self.goal);
        cost.is_finite().then_some(cost)
    }

    pub fn traversal(&self) -> &Traversal {
        &self.traversal
    }

    /// Is the edge from -> to lit up by the walk so far?
    pub fn is_edge_visited(&self, edge: &Edge) -> bool {
        self.traversal.is_edge_visited(&edge.from, &edge.to)
    }

    // === Mutation Methods ===

    /// Start (or restart) the walk along the computed path
    pub fn begin(&mut self, observer: &mut dyn SnapshotObserver) {
        let total_nodes = self.graph.nodes.len();
        self.traversal
            .start(self.path.clone(), &self.graph.edges, total_nodes, observer);
    }

    pub fn tick(&mut self, dt: f32, observer: &mut dyn SnapshotObserver) -> TickOutcome {
        self.traversal.tick(dt, observer)
    }

    /// Tear down the walk; must run before this session is replaced
    pub fn teardown(&mut self, observer: &mut dyn SnapshotObserver) {
        self.traversal.reset(observer);
    }
}
