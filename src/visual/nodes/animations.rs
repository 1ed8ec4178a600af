use bevy::prelude::*;

use crate::visual::{
    nodes::{GraphNode, components::NodeVisual},
    setup::ArrivedAt,
};

/// Emissive strength at full glow
const GLOW_EMISSIVE_SCALE: f32 = 3.0;

/// The goal flares brighter than intermediate stops
const GOAL_ARRIVAL_GLOW: f32 = 1.6;

/// System: Light up the node the orb just reached
pub fn trigger_arrival_glow(
    mut arrivals: MessageReader<ArrivedAt>,
    mut nodes: Query<(&GraphNode, &mut NodeVisual)>,
) {
    for arrival in arrivals.read() {
        for (graph_node, mut visual) in &mut nodes {
            if graph_node.node_id == arrival.node {
                visual.glow = if arrival.finished { GOAL_ARRIVAL_GLOW } else { 1.0 };
            }
        }
    }
}

/// Glow left after `dt` seconds of decay
pub fn decay_glow(glow: f32, dt: f32) -> f32 {
    // Exponential decay tuned at 60 Hz
    let next = glow * 0.95_f32.powf(dt * 60.0);
    if next < 0.01 { 0.0 } else { next }
}

/// System: Decay glow and push it into each node's emissive color
pub fn update_node_visuals(
    time: Res<Time>,
    mut nodes: Query<(&mut NodeVisual, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let dt = time.delta_secs();

    for (mut visual, material) in &mut nodes {
        if visual.glow <= 0.0 {
            continue;
        }

        visual.glow = decay_glow(visual.glow, dt);

        if let Some(material) = materials.get_mut(&material.0) {
            let base = visual.base_color.to_linear();
            let k = visual.glow * GLOW_EMISSIVE_SCALE;
            material.emissive = LinearRgba::rgb(base.red * k, base.green * k, base.blue * k);
        }
    }
}
