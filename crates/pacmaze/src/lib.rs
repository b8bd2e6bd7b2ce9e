//! # Pacmaze
//!
//! A small 3D maze game on top of `maze_engine`: a mouth-animated sphere walks
//! a labyrinth eating pickups until none are left.
//!
//! Keys: arrows turn the avatar (it always walks in the direction it faces),
//! space jumps over pickups, escape quits.

#![forbid(unsafe_code)]

pub mod avatar;
pub mod commands;
pub mod config;
pub mod error;
pub mod facing;
pub mod game;
pub mod layout;
pub mod maze;

pub use avatar::{Avatar, AvatarState, VerticalMotion};
pub use commands::Command;
pub use config::{AvatarConfig, GameConfig};
pub use error::GameError;
pub use facing::FacingDirection;
pub use game::{PacmazeGame, ScoreBoard};
pub use layout::{LayoutError, LevelLayout, PickupGrid, WallPlacement};
pub use maze::{Maze, PickupSink};

use maze_engine::render::HeadlessBackend;
use maze_engine::{Engine, RunSummary};

/// Play `config` on the headless backend with its scripted input
///
/// Returns the finished game alongside the engine's run summary.
pub fn run_headless(config: &GameConfig) -> Result<(PacmazeGame, RunSummary), GameError> {
    let mut game = PacmazeGame::new(config)?;
    let mut input = config.input.clone();
    let summary = Engine::run(
        config.engine.clone(),
        Box::new(HeadlessBackend::new()),
        &mut game,
        &mut input,
    )?;
    Ok((game, summary))
}
