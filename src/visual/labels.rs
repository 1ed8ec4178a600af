use bevy::prelude::*;

use crate::{camera::MainCamera, visual::setup::SceneEntity};

/// UI text pinned to a point in the 3D scene
#[derive(Component, Debug)]
pub struct WorldLabel {
    pub anchor: Vec3,
}

pub fn spawn_world_label(
    commands: &mut Commands,
    text: impl Into<String>,
    anchor: Vec3,
    font_size: f32,
    color: Color,
) {
    commands.spawn((
        Text::new(text),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(color),
        Node {
            position_type: PositionType::Absolute,
            ..default()
        },
        WorldLabel { anchor },
        SceneEntity,
    ));
}

/// System: Project every label's anchor into the viewport, centered on it
pub fn update_world_labels(
    cameras: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut labels: Query<(&WorldLabel, &ComputedNode, &mut Node, &mut Visibility)>,
) {
    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };

    for (label, computed, mut node, mut visibility) in &mut labels {
        match camera.world_to_viewport(camera_transform, label.anchor) {
            Ok(screen) => {
                let half = computed.size() * computed.inverse_scale_factor() * 0.5;
                node.left = Val::Px(screen.x - half.x);
                node.top = Val::Px(screen.y - half.y);
                visibility.set_if_neq(Visibility::Inherited);
            }
            Err(_) => {
                visibility.set_if_neq(Visibility::Hidden);
            }
        }
    }
}
