use crate::graph::{Edge, EdgeKey, NodeId, VisitedEdges};

use super::easing::ease_in_out_quad;
use super::snapshot::{Leg, Snapshot, SnapshotObserver, TraversalPhase, notify};

/// Default playback speed in edges per second (one edge every four seconds)
pub const DEFAULT_SPEED: f32 = 0.25;

/// What a single tick did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing; nothing changed
    Inactive,
    /// Still travelling along the current edge
    Moving,
    /// Arrived at an intermediate node
    EdgeCompleted(EdgeKey),
    /// Arrived at the final node
    Finished(EdgeKey),
}

/// Time-driven walk along a path
///
/// Owned by whoever renders it; all mutation goes through `start`, `tick` and
/// `reset`, each of which reports to the supplied observer.
#[derive(Debug, Clone)]
pub struct Traversal {
    path: Vec<NodeId>,
    edges: Vec<Edge>,
    visited: VisitedEdges,
    /// Index of the node the traversal last arrived at
    step: usize,
    /// Progress along the edge path[step] -> path[step + 1], in [0, 1)
    fraction: f32,
    phase: TraversalPhase,
    /// Edges per second
    speed: f32,
    total_nodes: usize,
}

impl Traversal {
    pub fn new(speed: f32) -> Self {
        let speed = if speed.is_finite() && speed > 0.0 {
            speed
        } else {
            DEFAULT_SPEED
        };

        Traversal {
            path: Vec::new(),
            edges: Vec::new(),
            visited: VisitedEdges::new(),
            step: 0,
            fraction: 0.0,
            phase: TraversalPhase::Idle,
            speed,
            total_nodes: 0,
        }
    }

    // === Queries ===

    pub fn phase(&self) -> TraversalPhase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == TraversalPhase::Playing
    }

    pub fn is_complete(&self) -> bool {
        self.phase == TraversalPhase::Complete
    }

    pub fn path(&self) -> &[NodeId] {
        &self.path
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn fraction(&self) -> f32 {
        self.fraction
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn total_steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    pub fn visited_edges(&self) -> &VisitedEdges {
        &self.visited
    }

    pub fn is_edge_visited(&self, from: &NodeId, to: &NodeId) -> bool {
        self.visited.contains_pair(from, to)
    }

    /// The node the traversal last arrived at
    pub fn current_node(&self) -> Option<&NodeId> {
        self.path.get(self.step)
    }

    pub fn goal(&self) -> Option<&NodeId> {
        self.path.last()
    }

    /// The edge being travelled, if playing
    pub fn leg(&self) -> Option<Leg> {
        if !self.is_playing() {
            return None;
        }
        Some(Leg {
            from: self.path.get(self.step)?.clone(),
            to: self.path.get(self.step + 1)?.clone(),
            eased: ease_in_out_quad(self.fraction),
        })
    }

    /// Whole percent; 100 only once complete
    pub fn progress(&self) -> u8 {
        match self.phase {
            TraversalPhase::Idle => 0,
            TraversalPhase::Complete => 100,
            TraversalPhase::Playing => {
                let total = self.total_steps() as f32;
                let raw = (100.0 * (self.step as f32 + self.fraction) / total).round();
                raw.clamp(0.0, 99.0) as u8
            }
        }
    }

    // === Transitions ===

    /// Begin walking `path`; anything in flight is discarded first
    ///
    /// Replacing a walk that is Playing or Complete reports a reset snapshot
    /// before the new walk's first one. Paths with fewer than two nodes are
    /// complete immediately.
    pub fn start(
        &mut self,
        path: Vec<NodeId>,
        edges: &[Edge],
        total_nodes: usize,
        observer: &mut dyn SnapshotObserver,
    ) {
        if self.phase == TraversalPhase::Idle {
            self.clear();
        } else {
            self.reset(observer);
        }
        self.path = path;
        self.edges = edges.to_vec();
        self.total_nodes = total_nodes;

        if self.total_steps() == 0 {
            self.phase = TraversalPhase::Complete;
            log::debug!("Traversal has no edges to walk; complete immediately");
        } else {
            self.phase = TraversalPhase::Playing;
            log::debug!(
                "Traversal started: {} steps from {}",
                self.total_steps(),
                self.path[0]
            );
        }

        let snapshot = self.snapshot(self.path.get(1).cloned());
        notify(observer, &snapshot);
    }

    /// Advance by `dt` seconds of real time; at most one edge completes per tick
    pub fn tick(&mut self, dt: f32, observer: &mut dyn SnapshotObserver) -> TickOutcome {
        if !self.is_playing() {
            return TickOutcome::Inactive;
        }

        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.fraction += dt * self.speed;

        if self.fraction < 1.0 {
            let mut snapshot = self.snapshot(self.path.get(self.step + 1).cloned());
            snapshot.leg = self.leg();
            notify(observer, &snapshot);
            return TickOutcome::Moving;
        }

        let key = EdgeKey::new(
            self.path[self.step].clone(),
            self.path[self.step + 1].clone(),
        );
        self.mark_edge_visited(&key);

        self.step += 1;
        self.fraction = 0.0;

        let finished = self.step >= self.total_steps();
        if finished {
            self.phase = TraversalPhase::Complete;
        }

        let arrived = self.snapshot(self.path.get(self.step + 1).cloned());
        notify(observer, &arrived);

        if finished {
            let final_snapshot = self.snapshot(None);
            notify(observer, &final_snapshot);
            log::debug!("Traversal complete at {}", self.path[self.step]);
            TickOutcome::Finished(key)
        } else {
            TickOutcome::EdgeCompleted(key)
        }
    }

    /// Drop the path and return to Idle
    pub fn reset(&mut self, observer: &mut dyn SnapshotObserver) {
        self.clear();
        notify(observer, &Snapshot::reset());
    }

    fn clear(&mut self) {
        self.path.clear();
        self.edges.clear();
        self.visited.clear();
        self.step = 0;
        self.fraction = 0.0;
        self.phase = TraversalPhase::Idle;
        self.total_nodes = 0;
    }

    /// Only edges that exist in the edge list are marked
    fn mark_edge_visited(&mut self, key: &EdgeKey) -> bool {
        let exists = self
            .edges
            .iter()
            .any(|edge| edge.connects(&key.from, &key.to));
        exists && self.visited.mark(key.clone())
    }

    fn snapshot(&self, current_to: Option<NodeId>) -> Snapshot {
        Snapshot {
            phase: self.phase,
            current_step: self.step,
            total_steps: self.total_steps(),
            current_from: self.path.get(self.step).cloned(),
            current_to,
            visited_edge_count: self.visited.len(),
            progress: self.progress(),
            total_nodes: self.total_nodes,
            goal: self.goal().cloned(),
            leg: None,
        }
    }
}

impl Default for Traversal {
    fn default() -> Self {
        Self::new(DEFAULT_SPEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journey::snapshot::{NullObserver, ObserverError};

    fn ids(names: &[&str]) -> Vec<NodeId> {
        names.iter().map(|&name| NodeId::from(name)).collect()
    }

    fn chain_edges() -> Vec<Edge> {
        vec![
            Edge::new("A", "B", 1.0),
            Edge::new("B", "C", 2.0),
            Edge::new("A", "C", 5.0),
        ]
    }

    /// Runs `f` with an observer that records every snapshot
    fn recording<R>(
        snapshots: &mut Vec<Snapshot>,
        f: impl FnOnce(&mut dyn SnapshotObserver) -> R,
    ) -> R {
        let mut observer = |s: &Snapshot| -> Result<(), ObserverError> {
            snapshots.push(s.clone());
            Ok(())
        };
        f(&mut observer)
    }

    #[test]
    fn test_new_traversal_is_idle() {
        let mut traversal = Traversal::default();

        assert_eq!(traversal.phase(), TraversalPhase::Idle);
        assert_eq!(traversal.progress(), 0);
        assert_eq!(traversal.tick(1.0, &mut NullObserver), TickOutcome::Inactive);
        assert!(traversal.leg().is_none());
    }

    #[test]
    fn test_start_emits_initial_snapshot() {
        let mut traversal = Traversal::default();
        let mut snapshots = Vec::new();

        recording(&mut snapshots, |obs| {
            traversal.start(ids(&["A", "B", "C"]), &chain_edges(), 3, obs)
        });

        assert_eq!(snapshots.len(), 1);
        let initial = &snapshots[0];
        assert_eq!(initial.phase, TraversalPhase::Playing);
        assert_eq!(initial.progress, 0);
        assert_eq!(initial.current_step, 0);
        assert_eq!(initial.total_steps, 2);
        assert_eq!(initial.from_label(), "A");
        assert_eq!(initial.to_label(), "B");
        assert_eq!(initial.goal_label(), "C");
        assert_eq!(initial.total_nodes, 3);
        assert_eq!(initial.visited_edge_count, 0);
    }

    #[test]
    fn test_tick_interpolates() {
        let mut traversal = Traversal::new(0.25);
        traversal.start(ids(&["A", "B", "C"]), &chain_edges(), 3, &mut NullObserver);

        let mut snapshots = Vec::new();
        let outcome = recording(&mut snapshots, |obs| traversal.tick(2.0, obs));

        assert_eq!(outcome, TickOutcome::Moving);
        assert_eq!(traversal.fraction(), 0.5);
        let snapshot = &snapshots[0];
        assert_eq!(snapshot.progress, 25);
        let leg = snapshot.leg.as_ref().expect("Interpolation snapshot should carry a leg");
        assert_eq!(leg.from, NodeId::from("A"));
        assert_eq!(leg.to, NodeId::from("B"));
        assert_eq!(leg.eased, 0.5);
    }

    #[test]
    fn test_edge_completion_marks_visited() {
        let mut traversal = Traversal::new(0.25);
        traversal.start(ids(&["A", "B", "C"]), &chain_edges(), 3, &mut NullObserver);

        let mut snapshots = Vec::new();
        let outcome = recording(&mut snapshots, |obs| traversal.tick(4.0, obs));

        assert_eq!(
            outcome,
            TickOutcome::EdgeCompleted(EdgeKey::new(NodeId::from("A"), NodeId::from("B")))
        );
        assert_eq!(traversal.step(), 1);
        assert_eq!(traversal.fraction(), 0.0);
        assert!(traversal.is_edge_visited(&NodeId::from("A"), &NodeId::from("B")));
        assert!(!traversal.is_edge_visited(&NodeId::from("A"), &NodeId::from("C")));

        let arrived = &snapshots[0];
        assert_eq!(arrived.progress, 50);
        assert_eq!(arrived.current_step, 1);
        assert_eq!(arrived.from_label(), "B");
        assert_eq!(arrived.to_label(), "C");
        assert_eq!(arrived.visited_edge_count, 1);
    }

    #[test]
    fn test_playback_is_frame_rate_independent() {
        let path = ids(&["A", "B", "C"]);

        let mut coarse = Traversal::new(0.25);
        coarse.start(path.clone(), &chain_edges(), 3, &mut NullObserver);
        let mut fine = Traversal::new(0.25);
        fine.start(path, &chain_edges(), 3, &mut NullObserver);

        // Four seconds of wall time, split differently
        for _ in 0..2 {
            coarse.tick(2.0, &mut NullObserver);
        }
        for _ in 0..8 {
            fine.tick(0.5, &mut NullObserver);
        }

        assert_eq!(coarse.step(), 1);
        assert_eq!(fine.step(), 1);
        assert_eq!(coarse.visited_edges().len(), fine.visited_edges().len());
    }

    #[test]
    fn test_runs_to_completion() {
        let mut traversal = Traversal::new(0.25);
        let mut snapshots = Vec::new();

        recording(&mut snapshots, |obs| {
            traversal.start(ids(&["A", "B", "C"]), &chain_edges(), 3, obs);
            let mut ticks = 0;
            while traversal.is_playing() {
                traversal.tick(0.1, obs);
                ticks += 1;
                assert!(ticks < 1000, "Traversal never finished");
            }
        });

        assert!(traversal.is_complete());
        assert_eq!(traversal.step(), 2);
        assert_eq!(traversal.visited_edges().len(), 2);

        let last = snapshots.last().unwrap();
        assert_eq!(last.progress, 100);
        assert_eq!(last.phase, TraversalPhase::Complete);
        assert_eq!(last.to_label(), "-");
        assert_eq!(last.from_label(), "C");
        assert_eq!(last.current_step, 2);

        assert_eq!(traversal.tick(1.0, &mut NullObserver), TickOutcome::Inactive);
    }

    #[test]
    fn test_progress_monotonic_and_100_only_when_complete() {
        let mut traversal = Traversal::new(1.0);
        let mut snapshots = Vec::new();
        let path = ids(&["n0", "n1", "n2", "n3", "n4", "n5", "n6", "n7"]);
        let edges: Vec<Edge> = path
            .windows(2)
            .map(|pair| Edge::new(pair[0].clone(), pair[1].clone(), 1.0))
            .collect();

        recording(&mut snapshots, |obs| {
            traversal.start(path.clone(), &edges, path.len(), obs);
            while traversal.is_playing() {
                traversal.tick(0.0137, obs);
            }
        });

        let mut previous = 0;
        for snapshot in &snapshots {
            assert!(snapshot.progress >= previous, "Progress went backwards");
            assert_eq!(
                snapshot.progress == 100,
                snapshot.phase == TraversalPhase::Complete,
                "100% must coincide with completion"
            );
            previous = snapshot.progress;
        }
        assert_eq!(previous, 100);
    }

    #[test]
    fn test_one_edge_per_tick() {
        let mut traversal = Traversal::new(0.25);
        traversal.start(ids(&["A", "B", "C"]), &chain_edges(), 3, &mut NullObserver);

        let outcome = traversal.tick(1000.0, &mut NullObserver);

        assert!(matches!(outcome, TickOutcome::EdgeCompleted(_)));
        assert_eq!(traversal.step(), 1);
        assert!(traversal.is_playing());
    }

    #[test]
    fn test_final_tick_emits_arrival_and_final_snapshots() {
        let mut traversal = Traversal::new(1.0);
        traversal.start(ids(&["A", "B"]), &chain_edges(), 2, &mut NullObserver);

        let mut snapshots = Vec::new();
        let outcome = recording(&mut snapshots, |obs| traversal.tick(1.0, obs));

        assert_eq!(
            outcome,
            TickOutcome::Finished(EdgeKey::new(NodeId::from("A"), NodeId::from("B")))
        );
        assert_eq!(snapshots.len(), 2);
        assert!(snapshots.iter().all(|s| s.progress == 100));
        assert_eq!(snapshots[1].to_label(), "-");
    }

    #[test]
    fn test_single_node_path_is_complete() {
        let mut traversal = Traversal::default();
        let mut snapshots = Vec::new();

        recording(&mut snapshots, |obs| traversal.start(ids(&["A"]), &[], 1, obs));

        assert!(traversal.is_complete());
        assert_eq!(traversal.total_steps(), 0);
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].progress, 100);
        assert_eq!(snapshots[0].from_label(), "A");
        assert_eq!(snapshots[0].to_label(), "-");
        assert_eq!(traversal.tick(1.0, &mut NullObserver), TickOutcome::Inactive);
    }

    #[test]
    fn test_empty_path_is_complete() {
        let mut traversal = Traversal::default();
        let mut snapshots = Vec::new();

        recording(&mut snapshots, |obs| traversal.start(Vec::new(), &chain_edges(), 3, obs));

        assert!(traversal.is_complete());
        assert_eq!(snapshots[0].progress, 100);
        assert_eq!(snapshots[0].total_steps, 0);
        assert_eq!(snapshots[0].from_label(), "-");
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut traversal = Traversal::new(0.25);
        traversal.start(ids(&["A", "B", "C"]), &chain_edges(), 3, &mut NullObserver);
        traversal.tick(4.0, &mut NullObserver);
        assert_eq!(traversal.visited_edges().len(), 1);

        let mut snapshots = Vec::new();
        recording(&mut snapshots, |obs| {
            traversal.reset(obs);
            // No stale interpolation after a reset
            assert_eq!(traversal.tick(1.0, obs), TickOutcome::Inactive);
        });

        assert_eq!(traversal.phase(), TraversalPhase::Idle);
        assert!(traversal.visited_edges().is_empty());
        assert!(traversal.path().is_empty());
        assert_eq!(snapshots, vec![Snapshot::reset()]);
    }

    #[test]
    fn test_restart_discards_previous_marks() {
        let mut traversal = Traversal::new(0.25);
        traversal.start(ids(&["A", "B", "C"]), &chain_edges(), 3, &mut NullObserver);
        traversal.tick(4.0, &mut NullObserver);

        traversal.start(ids(&["A", "C"]), &chain_edges(), 3, &mut NullObserver);

        assert!(traversal.visited_edges().is_empty());
        assert_eq!(traversal.step(), 0);
        assert_eq!(traversal.fraction(), 0.0);
        assert_eq!(traversal.total_steps(), 1);
    }

    #[test]
    fn test_replacing_a_walk_reports_a_reset_first() {
        let mut traversal = Traversal::new(1.0);
        let mut snapshots = Vec::new();

        recording(&mut snapshots, |obs| {
            traversal.start(ids(&["A", "B", "C"]), &chain_edges(), 3, obs);
            traversal.tick(1.0, obs);
        });
        let first_run = snapshots.len();

        recording(&mut snapshots, |obs| {
            traversal.start(ids(&["B", "C"]), &chain_edges(), 3, obs)
        });

        let replacement = &snapshots[first_run..];
        assert_eq!(replacement.len(), 2);
        assert_eq!(replacement[0], Snapshot::reset());
        assert_eq!(replacement[1].phase, TraversalPhase::Playing);
        assert_eq!(replacement[1].from_label(), "B");
        assert_eq!(replacement[1].to_label(), "C");
    }

    #[test]
    fn test_restarting_a_complete_walk_reports_a_reset_first() {
        let mut traversal = Traversal::new(1.0);
        traversal.start(ids(&["A", "B"]), &chain_edges(), 3, &mut NullObserver);
        traversal.tick(1.0, &mut NullObserver);
        assert!(traversal.is_complete());

        let mut snapshots = Vec::new();
        recording(&mut snapshots, |obs| {
            traversal.start(ids(&["A", "B"]), &chain_edges(), 3, obs)
        });

        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[0], Snapshot::reset());
        assert_eq!(snapshots[1].progress, 0);
    }

    #[test]
    fn test_repeated_edge_marked_once() {
        let edges = vec![Edge::new("A", "B", 1.0), Edge::new("B", "A", 1.0)];
        let mut traversal = Traversal::new(1.0);
        traversal.start(ids(&["A", "B", "A", "B"]), &edges, 2, &mut NullObserver);

        while traversal.is_playing() {
            traversal.tick(1.0, &mut NullObserver);
        }

        assert_eq!(traversal.step(), 3);
        assert_eq!(traversal.visited_edges().len(), 2);
    }

    #[test]
    fn test_missing_edge_is_not_marked() {
        let mut traversal = Traversal::new(1.0);
        traversal.start(ids(&["C", "A"]), &chain_edges(), 3, &mut NullObserver);

        traversal.tick(1.0, &mut NullObserver);

        assert!(traversal.is_complete());
        assert!(traversal.visited_edges().is_empty());
    }

    #[test]
    fn test_failing_observer_does_not_disturb_state() {
        let mut failing = |_: &Snapshot| -> Result<(), ObserverError> {
            Err(ObserverError("stats panel gone".to_string()))
        };
        let mut traversal = Traversal::new(1.0);

        traversal.start(ids(&["A", "B", "C"]), &chain_edges(), 3, &mut failing);
        traversal.tick(0.5, &mut failing);
        traversal.tick(0.5, &mut failing);
        traversal.tick(1.0, &mut failing);

        assert!(traversal.is_complete());
        assert_eq!(traversal.visited_edges().len(), 2);
    }

    #[test]
    fn test_panicking_observer_does_not_disturb_state() {
        let mut panicking = |s: &Snapshot| -> Result<(), ObserverError> {
            if s.current_step == 1 {
                panic!("observer blew up");
            }
            Ok(())
        };
        let mut traversal = Traversal::new(1.0);

        traversal.start(ids(&["A", "B", "C"]), &chain_edges(), 3, &mut panicking);
        traversal.tick(1.0, &mut panicking);
        traversal.tick(1.0, &mut panicking);

        assert!(traversal.is_complete());
        assert_eq!(traversal.visited_edges().len(), 2);
    }

    #[test]
    fn test_invalid_speed_falls_back_to_default() {
        assert_eq!(Traversal::new(0.0).speed(), DEFAULT_SPEED);
        assert_eq!(Traversal::new(-1.0).speed(), DEFAULT_SPEED);
        assert_eq!(Traversal::new(f32::NAN).speed(), DEFAULT_SPEED);
        assert_eq!(Traversal::new(2.0).speed(), 2.0);
    }

    #[test]
    fn test_negative_dt_does_not_rewind() {
        let mut traversal = Traversal::new(0.25);
        traversal.start(ids(&["A", "B"]), &chain_edges(), 2, &mut NullObserver);
        traversal.tick(2.0, &mut NullObserver);

        traversal.tick(-5.0, &mut NullObserver);

        assert_eq!(traversal.fraction(), 0.5);
    }
}
