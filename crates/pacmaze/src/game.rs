//! The game application: ties the maze, the avatar and the score together

use maze_engine::foundation::math::Point3;
use maze_engine::render::RenderBackend;
use maze_engine::{AppError, AppEvent, Application, Engine};

use crate::avatar::Avatar;
use crate::commands::Command;
use crate::config::GameConfig;
use crate::error::GameError;
use crate::maze::{Maze, PickupSink};

/// Score kept for eaten pickups
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreBoard {
    score: u32,
    last_eaten: Option<Point3>,
}

impl ScoreBoard {
    /// Pickups eaten so far
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Where the most recent pickup was
    pub const fn last_eaten(&self) -> Option<Point3> {
        self.last_eaten
    }
}

impl PickupSink for ScoreBoard {
    fn pickup_eaten(&mut self, position: Point3) {
        self.score += 1;
        self.last_eaten = Some(position);
        log::info!(
            "Pickup eaten at ({:.1}, {:.1}), score {}",
            position.x,
            position.z,
            self.score
        );
    }
}

/// Maze game driven by the engine loop
#[derive(Debug)]
pub struct PacmazeGame {
    maze: Maze,
    avatar: Avatar,
    score: ScoreBoard,
    cleared: bool,
}

impl PacmazeGame {
    /// Build the level and the avatar
    pub fn new(config: &GameConfig) -> Result<Self, GameError> {
        config.avatar.validate()?;
        Ok(Self {
            maze: Maze::build(&config.layout)?,
            avatar: Avatar::new(&config.avatar),
            score: ScoreBoard::default(),
            cleared: false,
        })
    }

    /// One simulation step
    ///
    /// Wall test first; pickups are only eaten by a grounded avatar that is
    /// not pressed against a wall. Then the avatar ticks. Returns whether the
    /// maze is now cleared.
    pub fn step(&mut self) -> bool {
        if self.cleared {
            return true;
        }

        let blocked = self.maze.is_colliding_with_wall(&self.avatar);
        if !blocked && self.avatar.state().is_grounded() {
            self.maze.collect_pickups_touching(&self.avatar, &mut self.score);
        }
        self.avatar.tick(blocked);

        if self.maze.is_cleared() {
            log::info!("Every pickup eaten, final score {}", self.score.score());
            self.cleared = true;
        }
        self.cleared
    }

    /// Apply a player command
    pub fn command(&mut self, command: Command) {
        command.apply(&mut self.avatar);
    }

    /// The level
    pub const fn maze(&self) -> &Maze {
        &self.maze
    }

    /// The player avatar
    pub const fn avatar(&self) -> &Avatar {
        &self.avatar
    }

    /// Score so far
    pub const fn score(&self) -> &ScoreBoard {
        &self.score
    }

    /// Whether the game has ended
    pub const fn is_cleared(&self) -> bool {
        self.cleared
    }
}

impl Application for PacmazeGame {
    fn initialize(&mut self, _engine: &mut Engine) -> Result<(), AppError> {
        log::info!(
            "Pacmaze starting with {} pickups to eat",
            self.maze.pickups_remaining()
        );
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
        if self.step() {
            engine.quit();
        }
        Ok(())
    }

    fn render(&mut self, backend: &mut dyn RenderBackend) -> Result<(), AppError> {
        for drawable in self.maze.renderables().into_iter().chain(self.avatar.drawables()) {
            backend.draw(drawable)?;
        }
        Ok(())
    }

    fn handle_event(&mut self, engine: &mut Engine, event: AppEvent) -> Result<(), AppError> {
        if let AppEvent::KeyPressed(key) = event {
            if let Some(command) = Command::from_key(key) {
                self.command(command);
                return Ok(());
            }
        }
        engine.handle_event(&event);
        Ok(())
    }

    fn cleanup(&mut self, _engine: &mut Engine) {
        log::info!(
            "Game over: score {}, {} pickups left",
            self.score.score(),
            self.maze.pickups_remaining()
        );
    }
}
