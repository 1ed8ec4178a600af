use bevy::prelude::*;

use crate::{
    config::AppConfig,
    graph::NodeId,
    input::ControlMessage,
    journey::{RunSession, TickOutcome},
    visual::ui::PathStats,
};

/// Example graph used when no input file is configured
pub const DEFAULT_GRAPH: &str = include_str!("../../../assets/default.graph");

/// The run being shown, if any input has been accepted yet
#[derive(Resource, Default)]
pub struct ActiveRun(pub Option<RunSession>);

/// A new run replaced the previous one; the scene must be rebuilt
#[derive(Message, Debug, Clone, Copy)]
pub struct RunReplaced;

/// The orb reached a node
#[derive(Message, Debug, Clone)]
pub struct ArrivedAt {
    pub node: NodeId,
    pub finished: bool,
}

/// Input text from the configured file, or the bundled example
pub fn read_graph_text(config: &AppConfig) -> Result<String, String> {
    match &config.input_path {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("Cannot read {}: {}", path.display(), e)),
        None => Ok(DEFAULT_GRAPH.to_string()),
    }
}

/// Read and solve the configured input
pub fn load_run(config: &AppConfig) -> Result<RunSession, String> {
    let text = read_graph_text(config)?;
    RunSession::from_text(&text, config.traversal_speed).map_err(|e| e.to_string())
}

/// Status line shown when a walk begins
pub fn start_message(run: &RunSession) -> String {
    match run.path() {
        [] => format!("No path from {} to {}", run.start(), run.goal()),
        [only] => format!("Already at {}", only),
        [first, ..] => format!("Starting at {}", first),
    }
}

/// System: Apply rerun/replay requests
///
/// A rerun that fails to load keeps the current run and only reports the error.
pub fn handle_controls(
    mut controls: MessageReader<ControlMessage>,
    config: Res<AppConfig>,
    mut active: ResMut<ActiveRun>,
    mut stats: ResMut<PathStats>,
    mut replaced: MessageWriter<RunReplaced>,
) {
    for control in controls.read() {
        match control {
            ControlMessage::Rerun => match load_run(&config) {
                Ok(mut run) => {
                    if let Some(previous) = active.0.as_mut() {
                        previous.teardown(&mut *stats);
                    }

                    stats.begin_run(&run, start_message(&run));
                    run.begin(&mut *stats);

                    info!(
                        "Loaded graph: {} nodes, {} edges, {} -> {}, path {:?}",
                        run.nodes().len(),
                        run.edges().len(),
                        run.start(),
                        run.goal(),
                        run.path().iter().map(NodeId::as_str).collect::<Vec<_>>()
                    );

                    if !run.has_path() {
                        warn!("{} is unreachable from {}", run.goal(), run.start());
                    }

                    active.0 = Some(run);
                    replaced.write(RunReplaced);
                }
                Err(message) => {
                    error!("Run request rejected: {}", message);
                    stats.status = message;
                }
            },
            ControlMessage::Replay => {
                let Some(run) = active.0.as_mut() else {
                    continue;
                };
                stats.begin_run(run, start_message(run));
                run.begin(&mut *stats);
                info!("Replaying path from {}", run.start());
            }
        }
    }
}

/// System: Advance the walk by this frame's delta, feeding the HUD stats
pub fn advance_traversal(
    time: Res<Time>,
    mut active: ResMut<ActiveRun>,
    mut stats: ResMut<PathStats>,
    mut arrivals: MessageWriter<ArrivedAt>,
) {
    let Some(run) = active.0.as_mut() else {
        return;
    };

    match run.tick(time.delta_secs(), &mut *stats) {
        TickOutcome::Inactive | TickOutcome::Moving => {}
        TickOutcome::EdgeCompleted(key) => {
            let traversal = run.traversal();
            if let Some(next) = traversal.path().get(traversal.step() + 1) {
                stats.status = format!("Moving from {} → {}", key.to, next);
            }
            arrivals.write(ArrivedAt {
                node: key.to,
                finished: false,
            });
        }
        TickOutcome::Finished(key) => {
            info!("Journey complete at {}", key.to);
            stats.status = format!("Reached {} - journey complete!", key.to);
            arrivals.write(ArrivedAt {
                node: key.to,
                finished: true,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_input_is_the_bundled_example() {
        let config = AppConfig::default();

        assert_eq!(read_graph_text(&config).unwrap(), DEFAULT_GRAPH);
        let run = load_run(&config).unwrap();
        assert_eq!(run.path().len(), 4);
    }

    #[test]
    fn test_missing_input_file_is_reported() {
        let config = AppConfig {
            input_path: Some(PathBuf::from("no/such/file.graph")),
            ..AppConfig::default()
        };

        let err = load_run(&config).unwrap_err();
        assert!(err.starts_with("Cannot read no/such/file.graph"));
    }

    #[test]
    fn test_start_messages() {
        let run = RunSession::from_text(DEFAULT_GRAPH, 0.25).unwrap();
        assert_eq!(start_message(&run), "Starting at Mansion");

        let run = RunSession::from_text("1 0\nA B", 0.25).unwrap();
        assert_eq!(start_message(&run), "No path from A to B");

        let run = RunSession::from_text("A B 1\nA A", 0.25).unwrap();
        assert_eq!(start_message(&run), "Already at A");
    }

    #[test]
    fn test_rerun_and_replay_drive_the_stats() {
        let mut app = App::new();
        app.add_message::<ControlMessage>()
            .add_message::<RunReplaced>()
            .insert_resource(AppConfig::default())
            .init_resource::<ActiveRun>()
            .init_resource::<PathStats>()
            .add_systems(Update, handle_controls);

        app.world_mut().write_message(ControlMessage::Rerun);
        app.update();

        let stats = app.world().resource::<PathStats>();
        assert_eq!(stats.status, "Starting at Mansion");
        assert_eq!(stats.snapshot.total_steps, 3);
        assert_eq!(stats.snapshot.total_nodes, 5);
        assert_eq!(stats.path_cost, Some(4.0));
        assert!(app.world().resource::<ActiveRun>().0.is_some());

        app.world_mut().write_message(ControlMessage::Replay);
        app.update();
        assert_eq!(
            app.world().resource::<PathStats>().snapshot.current_step,
            0
        );
    }

    #[test]
    fn test_failed_rerun_keeps_the_current_run() {
        let mut app = App::new();
        app.add_message::<ControlMessage>()
            .add_message::<RunReplaced>()
            .insert_resource(AppConfig::default())
            .init_resource::<ActiveRun>()
            .init_resource::<PathStats>()
            .add_systems(Update, handle_controls);

        app.world_mut().write_message(ControlMessage::Rerun);
        app.update();

        app.world_mut().resource_mut::<AppConfig>().input_path =
            Some(PathBuf::from("no/such/file.graph"));
        app.world_mut().write_message(ControlMessage::Rerun);
        app.update();

        assert!(app.world().resource::<ActiveRun>().0.is_some());
        assert!(
            app.world()
                .resource::<PathStats>()
                .status
                .starts_with("Cannot read")
        );
    }
}
