pub mod trail;

use bevy::prelude::*;

use crate::{
    camera::CameraTarget,
    journey::TraversalPhase,
    visual::setup::{ActiveRun, NodeLayout, SceneEntity},
};

pub use trail::{TrailAssets, TrailDot, fade_trail, setup_trail_assets, spawn_trail_dot};

const ORB_RADIUS: f32 = 0.3;
const ORB_COLOR: Color = Color::srgb(0.133, 0.827, 0.933);

/// The marker that walks the path
#[derive(Component)]
pub struct Orb;

pub fn spawn_orb(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(ORB_RADIUS).mesh().uv(32, 18))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: ORB_COLOR,
            emissive: ORB_COLOR.to_linear() * 2.0,
            ..default()
        })),
        Transform::default(),
        Visibility::Hidden,
        Orb,
        SceneEntity,
        Name::new("Orb"),
    ));
}

/// Scale of the orb's breathing pulse at `elapsed` seconds
pub fn orb_pulse(elapsed: f32) -> f32 {
    1.0 + (elapsed * 3.0).sin() * 0.1
}

/// Where the orb belongs right now, if anywhere
///
/// Between two nodes while playing, parked on the last node once complete.
pub fn orb_position(run: &ActiveRun, layout: &NodeLayout) -> Option<Vec3> {
    let traversal = run.0.as_ref()?.traversal();

    match traversal.phase() {
        TraversalPhase::Playing => {
            let leg = traversal.leg()?;
            let from = layout.position(&leg.from)?;
            let to = layout.position(&leg.to)?;
            Some(from.lerp(to, leg.eased))
        }
        TraversalPhase::Complete => layout.position(traversal.current_node()?),
        TraversalPhase::Idle => None,
    }
}

/// System: Place and pulse the orb, drop trail dots, and aim the camera while moving
pub fn move_orb(
    mut commands: Commands,
    time: Res<Time>,
    active: Res<ActiveRun>,
    layout: Res<NodeLayout>,
    trail_assets: Res<TrailAssets>,
    mut camera_target: ResMut<CameraTarget>,
    mut orbs: Query<(&mut Transform, &mut Visibility), With<Orb>>,
) {
    let Ok((mut transform, mut visibility)) = orbs.single_mut() else {
        return;
    };

    let Some(position) = orb_position(&active, &layout) else {
        visibility.set_if_neq(Visibility::Hidden);
        camera_target.0 = None;
        return;
    };

    transform.translation = position;
    transform.scale = Vec3::splat(orb_pulse(time.elapsed_secs()));
    visibility.set_if_neq(Visibility::Visible);

    let playing = active
        .0
        .as_ref()
        .is_some_and(|run| run.traversal().is_playing());
    if playing {
        spawn_trail_dot(&mut commands, &trail_assets, position);
        camera_target.0 = Some(position);
    } else {
        camera_target.0 = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journey::{RunSession, snapshot::NullObserver};

    fn run_with_layout(text: &str) -> (ActiveRun, NodeLayout) {
        let run = RunSession::from_text(text, 1.0).unwrap();
        let layout = NodeLayout::fibonacci_sphere(run.nodes());
        (ActiveRun(Some(run)), layout)
    }

    #[test]
    fn test_orb_hidden_without_a_run() {
        assert_eq!(orb_position(&ActiveRun::default(), &NodeLayout::default()), None);
    }

    #[test]
    fn test_orb_starts_on_the_first_node() {
        let (mut active, layout) = run_with_layout("A B 1\nA B");
        if let Some(run) = active.0.as_mut() {
            run.begin(&mut NullObserver);
        }

        let a = layout.position(&"A".into()).unwrap();
        assert!((orb_position(&active, &layout).unwrap() - a).length() < 1e-5);
    }

    #[test]
    fn test_orb_parks_on_the_goal() {
        let (mut active, layout) = run_with_layout("A B 1\nA B");
        if let Some(run) = active.0.as_mut() {
            run.begin(&mut NullObserver);
            run.tick(1.0, &mut NullObserver);
        }

        let b = layout.position(&"B".into()).unwrap();
        assert!((orb_position(&active, &layout).unwrap() - b).length() < 1e-5);
    }

    #[test]
    fn test_orb_hidden_when_unreachable() {
        let (mut active, layout) = run_with_layout("1 0\nA B");
        if let Some(run) = active.0.as_mut() {
            run.begin(&mut NullObserver);
        }

        assert_eq!(orb_position(&active, &layout), None);
    }

    #[test]
    fn test_pulse_range() {
        for i in 0..100 {
            let s = orb_pulse(i as f32 * 0.1);
            assert!((0.9..=1.1).contains(&s));
        }
    }
}
