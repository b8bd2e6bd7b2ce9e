//! Headless pacmaze runner
//!
//! Usage: `pacmaze [config.toml|config.ron]`. Without an argument the shipped
//! `config/pacmaze.toml` is looked up; without a file the defaults are played.

#![forbid(unsafe_code)]

use std::path::PathBuf;

use maze_engine::foundation::logging;
use pacmaze::config::{self, GameConfig, CONFIG_FILE};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("PANIC occurred: {panic_info}");
    }));

    let path = config::locate(std::env::args_os().nth(1).map(PathBuf::from));
    let config = GameConfig::load(path.as_deref())?;

    logging::init(logging::parse_level(&config.engine.log_level));
    match &path {
        Some(path) => log::info!("Configuration loaded from {}", path.display()),
        None => log::warn!("No {CONFIG_FILE} found, using built-in defaults"),
    }

    log::info!("Starting Pacmaze");
    let (game, summary) = pacmaze::run_headless(&config)?;

    log::info!(
        "Finished after {} frames ({:?}): score {}, {} pickups left, {} draw calls",
        summary.frames,
        summary.stop,
        game.score().score(),
        game.maze().pickups_remaining(),
        summary.render.draw_calls
    );
    Ok(())
}
