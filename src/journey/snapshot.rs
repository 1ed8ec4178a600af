use crate::graph::NodeId;

use std::fmt;
use std::panic::{self, AssertUnwindSafe};

/// Placeholder shown for an absent from/to/goal
pub const NO_NODE: &str = "-";

/// Lifecycle phase of a traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraversalPhase {
    /// No path, nothing to animate
    #[default]
    Idle,
    /// Advancing along the path over time
    Playing,
    /// Reached the final node (terminal)
    Complete,
}

/// The edge currently being travelled, with eased progress along it
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    pub from: NodeId,
    pub to: NodeId,
    /// Eased position in [0, 1]; 0 = at `from`, 1 = at `to`
    pub eased: f32,
}

/// Immutable bundle of progress fields handed to the observer
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub phase: TraversalPhase,
    pub current_step: usize,
    pub total_steps: usize,
    pub current_from: Option<NodeId>,
    pub current_to: Option<NodeId>,
    pub visited_edge_count: usize,
    /// Whole percent in [0, 100]
    pub progress: u8,
    pub total_nodes: usize,
    pub goal: Option<NodeId>,
    /// Present only while interpolating between two nodes
    pub leg: Option<Leg>,
}

impl Snapshot {
    /// Snapshot emitted when the traversal is torn down
    pub fn reset() -> Self {
        Snapshot {
            phase: TraversalPhase::Idle,
            current_step: 0,
            total_steps: 0,
            current_from: None,
            current_to: None,
            visited_edge_count: 0,
            progress: 0,
            total_nodes: 0,
            goal: None,
            leg: None,
        }
    }

    pub fn from_label(&self) -> &str {
        label(&self.current_from)
    }

    pub fn to_label(&self) -> &str {
        label(&self.current_to)
    }

    pub fn goal_label(&self) -> &str {
        label(&self.goal)
    }
}

fn label(node: &Option<NodeId>) -> &str {
    node.as_ref().map_or(NO_NODE, NodeId::as_str)
}

/// Failure reported by an observer; logged and otherwise ignored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObserverError(pub String);

impl fmt::Display for ObserverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "observer failed: {}", self.0)
    }
}

impl std::error::Error for ObserverError {}

/// Consumer of traversal snapshots
pub trait SnapshotObserver {
    fn observe(&mut self, snapshot: &Snapshot) -> Result<(), ObserverError>;
}

impl<F> SnapshotObserver for F
where
    F: FnMut(&Snapshot) -> Result<(), ObserverError>,
{
    fn observe(&mut self, snapshot: &Snapshot) -> Result<(), ObserverError> {
        self(snapshot)
    }
}

/// Observer that ignores every snapshot
pub struct NullObserver;

impl SnapshotObserver for NullObserver {
    fn observe(&mut self, _snapshot: &Snapshot) -> Result<(), ObserverError> {
        Ok(())
    }
}

/// Deliver `snapshot`, swallowing observer errors and panics
///
/// Returns false if the observer failed.
pub fn notify(observer: &mut dyn SnapshotObserver, snapshot: &Snapshot) -> bool {
    match panic::catch_unwind(AssertUnwindSafe(|| observer.observe(snapshot))) {
        Ok(Ok(())) => true,
        Ok(Err(err)) => {
            log::warn!("Snapshot observer error at step {}: {}", snapshot.current_step, err);
            false
        }
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            log::warn!(
                "Snapshot observer panicked at step {}: {}",
                snapshot.current_step,
                message
            );
            false
        }
    }
}
