use bevy::prelude::*;

use crate::{
    graph::NodeId,
    visual::{
        setup::ActiveRun,
        utils::{color_to_vec4, ease_out_cubic, lerp_hsv, vec4_to_color},
    },
};

/// Unvisited edge color (slate)
pub const EDGE_COLOR: Color = Color::srgba(0.278, 0.333, 0.412, 0.6);

/// Visited edge color (blue)
pub const VISITED_EDGE_COLOR: Color = Color::srgba(0.376, 0.647, 0.98, 1.0);

pub const EDGE_RADIUS: f32 = 0.04;

/// Seconds for a newly visited edge to reach its full tint
const TINT_DURATION: f32 = 0.5;

/// One directed edge drawn between two nodes
#[derive(Component, Debug)]
pub struct EdgeVisual {
    pub from: NodeId,
    pub to: NodeId,
    /// 0.0 = unvisited color, 1.0 = visited color
    pub tint: f32,
}

impl EdgeVisual {
    pub fn new(from: NodeId, to: NodeId) -> Self {
        EdgeVisual { from, to, tint: 0.0 }
    }
}

/// Transform for a unit-axis (Y) mesh stretched from `a` to `b`
///
/// None when the endpoints coincide.
pub fn edge_transform(a: Vec3, b: Vec3) -> Option<Transform> {
    let span = b - a;
    let length = span.length();
    if length < 1e-4 {
        return None;
    }

    Some(
        Transform::from_translation((a + b) * 0.5)
            .with_rotation(Quat::from_rotation_arc(Vec3::Y, span / length)),
    )
}

/// Edge color for a tint in [0, 1], blended in HSV with alpha rising to opaque
pub fn tint_color(tint: f32) -> Color {
    let t = ease_out_cubic(tint.clamp(0.0, 1.0));
    let from = color_to_vec4(EDGE_COLOR);
    let to = color_to_vec4(VISITED_EDGE_COLOR);

    vec4_to_color(lerp_hsv(from, to, t))
}

/// System: Fade edges towards the visited color once the walk has crossed them
pub fn update_edge_visuals(
    time: Res<Time>,
    active: Res<ActiveRun>,
    mut edges: Query<(&mut EdgeVisual, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(run) = active.0.as_ref() else {
        return;
    };
    let traversal = run.traversal();
    let step = time.delta_secs() / TINT_DURATION;

    for (mut edge, material) in &mut edges {
        let target = if traversal.is_edge_visited(&edge.from, &edge.to) {
            1.0
        } else {
            0.0
        };
        if edge.tint == target {
            continue;
        }

        // Replays drop the tint instantly; visits fade in
        edge.tint = if target > edge.tint {
            (edge.tint + step).min(target)
        } else {
            target
        };

        if let Some(material) = materials.get_mut(&material.0) {
            material.base_color = tint_color(edge.tint);
        }
    }
}
