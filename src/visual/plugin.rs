use crate::visual::edges::update_edge_visuals;
use crate::visual::labels::update_world_labels;
use crate::visual::nodes::{trigger_arrival_glow, update_node_visuals};
use crate::visual::orb::{fade_trail, move_orb, setup_trail_assets};
use crate::visual::setup::{
    ActiveRun, ArrivedAt, NodeLayout, RunReplaced, advance_traversal, handle_controls,
    rebuild_scene, spawn_lights,
};
use crate::visual::ui::{PathStats, spawn_hud, update_hud};
use bevy::prelude::*;

pub struct PathScenePlugin;

impl Plugin for PathScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveRun>()
            .init_resource::<PathStats>()
            .init_resource::<NodeLayout>()
            .add_message::<RunReplaced>()
            .add_message::<ArrivedAt>()
            .add_systems(Startup, (spawn_lights, setup_trail_assets, spawn_hud))
            .add_systems(
                Update,
                (
                    // Run lifecycle (rerun/replay, then rebuild the scene for a new run)
                    handle_controls,
                    rebuild_scene,
                    // Walk
                    advance_traversal,
                    move_orb,
                    fade_trail,
                    // Visual updates
                    trigger_arrival_glow,
                    update_node_visuals,
                    update_edge_visuals,
                    update_world_labels,
                    update_hud,
                )
                    .chain(),
            );
    }
}
