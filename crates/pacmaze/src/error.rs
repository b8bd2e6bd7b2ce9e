//! Game-level errors

use maze_engine::config::ConfigError;
use maze_engine::EngineError;
use thiserror::Error;

use crate::layout::LayoutError;

/// Errors that stop the game before or while it runs
#[derive(Error, Debug)]
pub enum GameError {
    /// Configuration file could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A setting is outside its valid range
    #[error("Invalid setting: {0}")]
    InvalidSetting(String),

    /// Level layout is malformed
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    /// Engine failed
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
}
