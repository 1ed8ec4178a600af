use bevy::prelude::*;

use crate::{config::AppConfig, visual::setup::SceneEntity};

const TRAIL_DOT_RADIUS: f32 = 0.12;

/// A fading dot left behind by the orb
#[derive(Component, Debug)]
pub struct TrailDot {
    /// 1.0 when spawned, removed at 0.0
    pub life: f32,
}

/// Shared mesh and material for every trail dot
#[derive(Resource)]
pub struct TrailAssets {
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
}

pub fn setup_trail_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let color = Color::srgb(0.404, 0.91, 0.976);
    commands.insert_resource(TrailAssets {
        mesh: meshes.add(Sphere::new(TRAIL_DOT_RADIUS).mesh().uv(8, 6)),
        material: materials.add(StandardMaterial {
            base_color: color,
            emissive: color.to_linear() * 1.5,
            unlit: true,
            ..default()
        }),
    });
}

pub fn spawn_trail_dot(commands: &mut Commands, assets: &TrailAssets, position: Vec3) {
    commands.spawn((
        Mesh3d(assets.mesh.clone()),
        MeshMaterial3d(assets.material.clone()),
        Transform::from_translation(position),
        TrailDot { life: 1.0 },
        SceneEntity,
    ));
}

/// Life left after `dt` seconds at `fade_rate` per second
pub fn fade_life(life: f32, dt: f32, fade_rate: f32) -> f32 {
    (life - dt * fade_rate).max(0.0)
}

/// System: Shrink trail dots as they fade and despawn spent ones
pub fn fade_trail(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<AppConfig>,
    mut dots: Query<(Entity, &mut TrailDot, &mut Transform)>,
) {
    let dt = time.delta_secs();

    for (entity, mut dot, mut transform) in &mut dots {
        dot.life = fade_life(dot.life, dt, config.trail_fade_rate);
        if dot.life <= 0.0 {
            commands.entity(entity).despawn();
        } else {
            transform.scale = Vec3::splat(dot.life);
        }
    }
}
