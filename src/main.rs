use bevy::prelude::*;

mod camera;
mod config;
mod graph;
mod input;
mod journey;
mod visual;

use bevy::window::WindowResolution;
use camera::CameraPlugin;
use clap::Parser;
use config::AppConfig;
use input::InputPlugin;
use std::path::PathBuf;

use crate::visual::plugin::PathScenePlugin;

/// Solve a checkpoint graph and animate the shortest route through it
#[derive(Parser, Debug)]
#[command(name = "checkpoint_path", version, about)]
struct Cli {
    /// Graph text file (header, `from to cost` lines, `start goal` trailer)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// JSON settings file (defaults to ./checkpoint_path.json when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Playback speed in edges per second
    #[arg(short, long)]
    speed: Option<f32>,
}

impl Cli {
    /// Command-line values win over the config file
    fn apply(self, mut config: AppConfig) -> AppConfig {
        if let Some(input) = self.input {
            config.input_path = Some(input);
        }
        if let Some(speed) = self.speed {
            config.traversal_speed = speed;
        }
        config.validated()
    }
}

fn main() {
    let cli = Cli::parse();
    let config = AppConfig::load_or_default(cli.config.as_deref());
    let config = cli.apply(config);

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: config.window_title.clone(),
            resolution: WindowResolution::new(1280, 800),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(ClearColor(Color::srgb_u8(0x0b, 0x12, 0x20)))
    .insert_resource(config)
    .add_plugins(CameraPlugin)
    .add_plugins(InputPlugin)
    .add_plugins(PathScenePlugin);

    app.run();
}
