use bevy::prelude::*;

pub struct InputPlugin;
impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ControlMessage>()
            .add_systems(Startup, request_initial_run)
            .add_systems(Update, collect_keyboard_controls);
    }
}

/// User requests that drive the run lifecycle
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlMessage {
    /// Re-read the input text and solve it from scratch
    Rerun,
    /// Walk the current path again from the start node
    Replay,
}

/// Key bindings
const RERUN_KEY: KeyCode = KeyCode::KeyR;
const REPLAY_KEY: KeyCode = KeyCode::Space;

fn request_initial_run(mut out: MessageWriter<ControlMessage>) {
    out.write(ControlMessage::Rerun);
}

fn collect_keyboard_controls(
    keys: Res<ButtonInput<KeyCode>>,
    mut out: MessageWriter<ControlMessage>,
) {
    if keys.just_pressed(RERUN_KEY) {
        out.write(ControlMessage::Rerun);
    }
    if keys.just_pressed(REPLAY_KEY) {
        out.write(ControlMessage::Replay);
    }
}
