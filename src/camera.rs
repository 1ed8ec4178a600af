use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll, MouseScrollUnit};
use bevy::prelude::*;

use crate::config::AppConfig;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraTarget>()
            .add_systems(Startup, setup_camera)
            .add_systems(Update, (orbit_input, follow_target, apply_orbit).chain());
    }
}

/// Where the camera starts, looking at the origin
const HOME_POSITION: Vec3 = Vec3::new(15.0, 10.0, 20.0);

/// Radians of orbit per pixel of mouse drag
const ROTATE_SENSITIVITY: f32 = 0.005;

/// Keeps the camera off the poles so `look_at` stays stable
const MAX_PITCH: f32 = 1.45;

/// Radius factor per scroll line
const ZOOM_STEP: f32 = 1.1;
const MIN_RADIUS: f32 = 3.0;
const MAX_RADIUS: f32 = 200.0;

/// Pixel-unit scroll deltas (touchpads) per line-unit step
const PIXELS_PER_LINE: f32 = 20.0;

/// Point the camera should chase; None leaves the camera to the user
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct CameraTarget(pub Option<Vec3>);

#[derive(Component)]
pub struct MainCamera;

/// Damped orbit around a focus point
///
/// Mouse input moves the `target_*` values; the current values ease towards
/// them every frame. The focus always drifts back to the graph center.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    pub focus: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub radius: f32,
    pub target_focus: Vec3,
    pub target_yaw: f32,
    pub target_pitch: f32,
    pub target_radius: f32,
    /// Left button held; the user has the camera
    pub dragging: bool,
}

impl OrbitCamera {
    /// Orbit that puts the camera at `position`, looking at `focus`
    pub fn looking_from(focus: Vec3, position: Vec3) -> Self {
        let (yaw, pitch, radius) = spherical(position - focus);
        OrbitCamera {
            focus,
            yaw,
            pitch,
            radius,
            target_focus: focus,
            target_yaw: yaw,
            target_pitch: pitch,
            target_radius: radius,
            dragging: false,
        }
    }

    pub fn translation(&self) -> Vec3 {
        self.focus + orbit_offset(self.yaw, self.pitch, self.radius)
    }

    /// Turn by a mouse drag in pixels
    pub fn rotate(&mut self, drag: Vec2) {
        self.target_yaw -= drag.x * ROTATE_SENSITIVITY;
        self.target_pitch =
            (self.target_pitch + drag.y * ROTATE_SENSITIVITY).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Positive lines zoom in
    pub fn zoom(&mut self, lines: f32) {
        self.target_radius =
            (self.target_radius * ZOOM_STEP.powf(-lines)).clamp(MIN_RADIUS, MAX_RADIUS);
    }

    /// Ease the current pose towards the targets
    pub fn damp(&mut self, rate_per_frame: f32, dt: f32) {
        let t = follow_blend(rate_per_frame, dt);
        self.focus = self.focus.lerp(self.target_focus, t);
        self.yaw += (self.target_yaw - self.yaw) * t;
        self.pitch += (self.target_pitch - self.pitch) * t;
        self.radius += (self.target_radius - self.radius) * t;
    }

    /// Adopt a pose set from outside (the orb follow)
    ///
    /// The zoom target is kept, so the view settles back to the user's
    /// distance once following stops.
    pub fn sync_to(&mut self, focus: Vec3, position: Vec3) {
        let (yaw, pitch, radius) = spherical(position - focus);
        self.focus = focus;
        self.yaw = yaw;
        self.pitch = pitch;
        self.radius = radius;
        self.target_yaw = yaw;
        self.target_pitch = pitch;
    }
}

/// Camera offset from the focus for the given orbit angles
pub fn orbit_offset(yaw: f32, pitch: f32, radius: f32) -> Vec3 {
    Vec3::new(
        radius * pitch.cos() * yaw.sin(),
        radius * pitch.sin(),
        radius * pitch.cos() * yaw.cos(),
    )
}

/// Inverse of `orbit_offset`: (yaw, pitch, radius)
pub fn spherical(offset: Vec3) -> (f32, f32, f32) {
    let radius = offset.length();
    if radius < 1e-4 {
        return (0.0, 0.0, MIN_RADIUS);
    }
    let pitch = (offset.y / radius).clamp(-1.0, 1.0).asin().clamp(-MAX_PITCH, MAX_PITCH);
    let yaw = offset.x.atan2(offset.z);
    (yaw, pitch, radius)
}

/// Scroll delta in line steps
pub fn scroll_lines(unit: MouseScrollUnit, delta_y: f32) -> f32 {
    match unit {
        MouseScrollUnit::Line => delta_y,
        MouseScrollUnit::Pixel => delta_y / PIXELS_PER_LINE,
    }
}

/// Setup a perspective camera looking at the graph from above and to the side
///
/// Coordinate System (right-handed, Y-up):
/// ```text
///        Y (height)
///        ↑
///        |
///   ----+---→ X
///       /
///      ↙ Z (towards the viewer)
/// ```
fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(HOME_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
        OrbitCamera::looking_from(Vec3::ZERO, HOME_POSITION),
        MainCamera,
    ));
}

/// Drag with the left button to orbit, scroll to zoom
fn orbit_input(
    buttons: Res<ButtonInput<MouseButton>>,
    motion: Res<AccumulatedMouseMotion>,
    scroll: Res<AccumulatedMouseScroll>,
    mut cameras: Query<&mut OrbitCamera, With<MainCamera>>,
) {
    let Ok(mut orbit) = cameras.single_mut() else {
        return;
    };

    orbit.dragging = buttons.pressed(MouseButton::Left);
    if orbit.dragging && motion.delta != Vec2::ZERO {
        orbit.rotate(motion.delta);
    }

    let lines = scroll_lines(scroll.unit, scroll.delta.y);
    if lines != 0.0 {
        orbit.zoom(lines);
    }
}

/// Ease towards `target + offset` and keep the target in view, unless the user is dragging
fn follow_target(
    time: Res<Time>,
    target: Res<CameraTarget>,
    config: Res<AppConfig>,
    mut cameras: Query<(&mut Transform, &mut OrbitCamera), With<MainCamera>>,
) {
    let Some(target) = target.0 else {
        return;
    };
    let Ok((mut transform, mut orbit)) = cameras.single_mut() else {
        return;
    };
    if orbit.dragging {
        return;
    }

    let t = follow_blend(config.camera_follow_rate, time.delta_secs());
    let desired = target + config.camera_offset();
    transform.translation = transform.translation.lerp(desired, t);
    transform.look_at(target, Vec3::Y);
    orbit.sync_to(target, transform.translation);
}

/// Place the camera from its orbit whenever the orb follow is not driving it
fn apply_orbit(
    time: Res<Time>,
    target: Res<CameraTarget>,
    config: Res<AppConfig>,
    mut cameras: Query<(&mut Transform, &mut OrbitCamera), With<MainCamera>>,
) {
    let Ok((mut transform, mut orbit)) = cameras.single_mut() else {
        return;
    };
    if target.0.is_some() && !orbit.dragging {
        return;
    }

    orbit.damp(config.orbit_damping, time.delta_secs());
    transform.translation = orbit.translation();
    transform.look_at(orbit.focus, Vec3::Y);
}

/// Per-frame blend factor for a rate tuned at 60 Hz, independent of the actual frame time
pub fn follow_blend(rate_per_frame: f32, dt: f32) -> f32 {
    1.0 - (1.0 - rate_per_frame.clamp(0.0, 1.0)).powf(dt * 60.0)
}
