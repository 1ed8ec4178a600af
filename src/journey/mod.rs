pub mod easing;
pub mod session;
pub mod snapshot;
pub mod traversal;

pub use session::RunSession;
pub use snapshot::{NO_NODE, ObserverError, Snapshot, SnapshotObserver, TraversalPhase};
pub use traversal::{DEFAULT_SPEED, TickOutcome};
