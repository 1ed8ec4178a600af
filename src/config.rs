use bevy::prelude::*;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::journey::DEFAULT_SPEED;

/// Config file picked up from the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "checkpoint_path.json";

/// Runtime settings for the visualizer
///
/// Every field is optional in the JSON file; missing ones keep their defaults.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Graph text file; the bundled example is used when absent
    pub input_path: Option<PathBuf>,
    /// Edges per second
    pub traversal_speed: f32,
    /// Fraction of the remaining distance the camera covers per 60 Hz frame
    pub camera_follow_rate: f32,
    /// Camera position relative to the orb while following
    pub camera_offset: [f32; 3],
    /// Fraction of the remaining orbit/zoom the camera covers per 60 Hz frame
    pub orbit_damping: f32,
    /// Trail dot life lost per second
    pub trail_fade_rate: f32,
    pub node_radius: f32,
    pub window_title: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input_path: None,
            traversal_speed: DEFAULT_SPEED,
            camera_follow_rate: 0.04,
            camera_offset: [8.0, 5.0, 8.0],
            orbit_damping: 0.1,
            trail_fade_rate: 0.6,
            node_radius: 0.5,
            window_title: "Checkpoint Path Finder".to_string(),
        }
    }
}

impl AppConfig {
    /// Parse JSON config text
    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: AppConfig =
            serde_json::from_str(json).map_err(|e| format!("Invalid config: {}", e))?;
        Ok(config.validated())
    }

    /// Read a config file from disk
    pub fn load(path: &Path) -> Result<Self, String> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
        Self::from_json(&json)
    }

    /// Load `explicit` if given, else the default file if it exists, else defaults
    ///
    /// Errors are logged and fall back to defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Self {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !fallback.exists() {
                    return Self::default();
                }
                fallback
            }
        };

        match Self::load(&path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("{} - using default settings", e);
                Self::default()
            }
        }
    }

    /// Replace non-positive or non-finite tuning values with defaults
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();

        if !is_positive(self.traversal_speed) {
            self.traversal_speed = defaults.traversal_speed;
        }
        if !is_positive(self.camera_follow_rate) || self.camera_follow_rate > 1.0 {
            self.camera_follow_rate = defaults.camera_follow_rate;
        }
        if !is_positive(self.orbit_damping) || self.orbit_damping > 1.0 {
            self.orbit_damping = defaults.orbit_damping;
        }
        if !is_positive(self.trail_fade_rate) {
            self.trail_fade_rate = defaults.trail_fade_rate;
        }
        if !is_positive(self.node_radius) {
            self.node_radius = defaults.node_radius;
        }
        if !self.camera_offset.iter().all(|v| v.is_finite()) {
            self.camera_offset = defaults.camera_offset;
        }
        self
    }

    pub fn camera_offset(&self) -> Vec3 {
        Vec3::from_array(self.camera_offset)
    }
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}
