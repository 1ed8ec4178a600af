//! Stats panel and status line.
//!
//! The traversal reports into [`PathStats`] as its snapshot observer; the HUD
//! text is rebuilt from it whenever it changes.

use bevy::prelude::*;

use crate::journey::{NO_NODE, ObserverError, RunSession, Snapshot, SnapshotObserver};

const PANEL_COLOR: Color = Color::srgba(0.06, 0.09, 0.16, 0.85);
const TRACK_COLOR: Color = Color::srgb(0.2, 0.25, 0.33);
const FILL_COLOR: Color = Color::srgb(0.376, 0.647, 0.98);
const TEXT_COLOR: Color = Color::srgb(0.886, 0.91, 0.941);
const HINT_COLOR: Color = Color::srgb(0.58, 0.64, 0.72);

/// Latest progress as reported by the traversal, plus run-level facts
#[derive(Resource, Debug, Clone)]
pub struct PathStats {
    pub snapshot: Snapshot,
    pub path_cost: Option<f64>,
    pub total_edges: usize,
    pub status: String,
}

impl Default for PathStats {
    fn default() -> Self {
        PathStats {
            snapshot: Snapshot::reset(),
            path_cost: None,
            total_edges: 0,
            status: "Loading graph...".to_string(),
        }
    }
}

impl PathStats {
    /// Record the run-level facts before its walk starts reporting
    pub fn begin_run(&mut self, run: &RunSession, status: String) {
        self.path_cost = run.path_cost();
        self.total_edges = run.edges().len();
        self.status = status;
    }
}

impl SnapshotObserver for PathStats {
    fn observe(&mut self, snapshot: &Snapshot) -> Result<(), ObserverError> {
        self.snapshot = snapshot.clone();
        Ok(())
    }
}

/// Panel body text
pub fn format_stats(stats: &PathStats) -> String {
    let s = &stats.snapshot;
    let cost = stats
        .path_cost
        .map_or_else(|| NO_NODE.to_string(), |cost| cost.to_string());

    format!(
        "Step {}/{}\nFrom {}\nTo {}\nGoal {}\nPath cost {}\nVisited edges {}/{}\nNodes {}\nProgress {}%",
        s.current_step,
        s.total_steps,
        s.from_label(),
        s.to_label(),
        s.goal_label(),
        cost,
        s.visited_edge_count,
        stats.total_edges,
        s.total_nodes,
        s.progress,
    )
}

#[derive(Component)]
pub struct StatsText;

#[derive(Component)]
pub struct StatusText;

#[derive(Component)]
pub struct ProgressFill;

/// Spawn the stats panel (top left) and the status line (bottom center)
pub fn spawn_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(16.0),
                top: Val::Px(16.0),
                width: Val::Px(260.0),
                padding: UiRect::all(Val::Px(14.0)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(8.0),
                ..default()
            },
            BackgroundColor(PANEL_COLOR),
            Name::new("Stats Panel"),
        ))
        .with_children(|panel| {
            panel.spawn((
                Text::new("Checkpoint Path"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(TEXT_COLOR),
            ));
            panel.spawn((
                Text::new(format_stats(&PathStats::default())),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(TEXT_COLOR),
                StatsText,
            ));
            panel
                .spawn((
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Px(8.0),
                        ..default()
                    },
                    BackgroundColor(TRACK_COLOR),
                ))
                .with_children(|track| {
                    track.spawn((
                        Node {
                            width: Val::Percent(0.0),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        BackgroundColor(FILL_COLOR),
                        ProgressFill,
                    ));
                });
            panel.spawn((
                Text::new("R: reload input   Space: replay\nDrag: orbit   Scroll: zoom"),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(HINT_COLOR),
            ));
        });

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(24.0),
                width: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                ..default()
            },
            Name::new("Status Line"),
        ))
        .with_children(|line| {
            line.spawn((
                Text::new(""),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(TEXT_COLOR),
                StatusText,
            ));
        });
}

/// Refresh the HUD when the stats changed this frame
pub fn update_hud(
    stats: Res<PathStats>,
    mut stats_text: Query<&mut Text, (With<StatsText>, Without<StatusText>)>,
    mut status_text: Query<&mut Text, (With<StatusText>, Without<StatsText>)>,
    mut fill: Query<&mut Node, With<ProgressFill>>,
) {
    if !stats.is_changed() {
        return;
    }

    for mut text in &mut stats_text {
        text.0 = format_stats(&stats);
    }
    for mut text in &mut status_text {
        if text.0 != stats.status {
            text.0 = stats.status.clone();
        }
    }
    for mut node in &mut fill {
        node.width = Val::Percent(stats.snapshot.progress as f32);
    }
}
