mod common;
mod config;
mod console;
mod display;
mod error;
mod simulation;

use crate::config::{CONFIG_PATH, Config};
use crate::console::ConsolePlugin;
use crate::simulation::SimulationPlugin;
use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;

fn main() -> AppExit {
    let config = match Config::load_or_default(CONFIG_PATH) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            return AppExit::error();
        }
    };

    App::new()
        .add_plugins(LogPlugin {
            level: Level::WARN,
            filter: config.log_filter.clone(),
            ..default()
        })
        .add_plugins(ConsolePlugin { pacing: config.pacing })
        .add_plugins(SimulationPlugin { config })
        .run()
}
