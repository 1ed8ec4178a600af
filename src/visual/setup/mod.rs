pub mod layout;
pub mod run;
pub mod scene;

pub use layout::NodeLayout;
pub use run::{ActiveRun, ArrivedAt, RunReplaced, advance_traversal, handle_controls};
pub use scene::{SceneEntity, rebuild_scene, spawn_lights};
