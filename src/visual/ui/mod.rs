pub mod hud;

pub use hud::{PathStats, spawn_hud, update_hud};
