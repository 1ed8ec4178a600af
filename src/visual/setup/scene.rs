use bevy::prelude::*;

use crate::{
    config::AppConfig,
    journey::RunSession,
    visual::{
        edges::{EDGE_COLOR, EDGE_RADIUS, EdgeVisual, edge_transform},
        labels::spawn_world_label,
        nodes::{GraphNode, NodeRole, NodeVisual, role_color},
        orb::spawn_orb,
        setup::{
            layout::NodeLayout,
            run::{ActiveRun, RunReplaced},
        },
    },
};

const NODE_LABEL_COLOR: Color = Color::srgb(0.886, 0.91, 0.941);
const COST_LABEL_COLOR: Color = Color::srgb(0.796, 0.835, 0.882);

/// Arrowhead size relative to the node radius
const ARROW_LENGTH_FACTOR: f32 = 1.2;
const ARROW_RADIUS_FACTOR: f32 = 0.35;

/// Everything that belongs to one run's scene; despawned on rerun
#[derive(Component)]
pub struct SceneEntity;

/// Lights survive reruns
pub fn spawn_lights(mut commands: Commands) {
    commands.spawn((
        DirectionalLight {
            illuminance: 9_000.0,
            ..default()
        },
        Transform::from_xyz(10.0, 15.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
        Name::new("Key Light"),
    ));
    commands.spawn((
        DirectionalLight {
            illuminance: 2_500.0,
            color: Color::srgb(0.267, 0.4, 1.0),
            ..default()
        },
        Transform::from_xyz(-8.0, -6.0, -10.0).looking_at(Vec3::ZERO, Vec3::Y),
        Name::new("Fill Light"),
    ));
}

/// System: Replace the scene when a new run was accepted
pub fn rebuild_scene(
    mut commands: Commands,
    mut replaced: MessageReader<RunReplaced>,
    active: Res<ActiveRun>,
    config: Res<AppConfig>,
    previous: Query<Entity, With<SceneEntity>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if replaced.read().count() == 0 {
        return;
    }
    let Some(run) = active.0.as_ref() else {
        return;
    };

    for entity in &previous {
        commands.entity(entity).despawn();
    }

    let layout = NodeLayout::fibonacci_sphere(run.nodes());
    info!(
        "Scene setup: {} nodes on a sphere of radius {}",
        layout.len(),
        layout.radius()
    );

    spawn_nodes(&mut commands, &mut meshes, &mut materials, run, &layout, config.node_radius);
    spawn_edges(&mut commands, &mut meshes, &mut materials, run, &layout, config.node_radius);
    spawn_orb(&mut commands, &mut meshes, &mut materials);

    commands.insert_resource(layout);
}

fn spawn_nodes(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    run: &RunSession,
    layout: &NodeLayout,
    node_radius: f32,
) {
    let mesh = meshes.add(Sphere::new(node_radius).mesh().uv(24, 24));

    for node_id in run.nodes() {
        let Some(center) = layout.position(node_id) else {
            continue;
        };
        let color = role_color(NodeRole::of(node_id, run.start(), run.goal()));

        commands.spawn((
            Mesh3d(mesh.clone()),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: color,
                perceptual_roughness: 0.5,
                ..default()
            })),
            Transform::from_translation(center),
            GraphNode {
                node_id: node_id.clone(),
            },
            NodeVisual::new(color),
            SceneEntity,
        ));

        spawn_world_label(
            commands,
            node_id.as_str(),
            center + Vec3::Y * (node_radius + 0.4),
            15.0,
            NODE_LABEL_COLOR,
        );
    }
}

fn spawn_edges(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    run: &RunSession,
    layout: &NodeLayout,
    node_radius: f32,
) {
    let arrow_length = node_radius * ARROW_LENGTH_FACTOR;
    let arrow = meshes.add(Cone::new(node_radius * ARROW_RADIUS_FACTOR, arrow_length));

    for edge in run.edges() {
        let (Some(a), Some(b)) = (layout.position(&edge.from), layout.position(&edge.to)) else {
            continue;
        };
        let Some(transform) = edge_transform(a, b) else {
            continue;
        };
        let length = a.distance(b);

        let material = materials.add(StandardMaterial {
            base_color: EDGE_COLOR,
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()
        });

        // Arrow tip touches the target node's surface
        let tip_offset = length * 0.5 - node_radius - arrow_length * 0.5;

        commands
            .spawn((
                Mesh3d(meshes.add(Cylinder::new(EDGE_RADIUS, length))),
                MeshMaterial3d(material.clone()),
                transform,
                EdgeVisual::new(edge.from.clone(), edge.to.clone()),
                SceneEntity,
            ))
            .with_children(|parent| {
                if tip_offset > 0.0 {
                    parent.spawn((
                        Mesh3d(arrow.clone()),
                        MeshMaterial3d(material),
                        Transform::from_xyz(0.0, tip_offset, 0.0),
                    ));
                }
            });

        spawn_world_label(
            commands,
            edge.cost.to_string(),
            (a + b) * 0.5 + Vec3::Y * 0.25,
            13.0,
            COST_LABEL_COLOR,
        );
    }
}
