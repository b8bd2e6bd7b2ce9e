//! Application trait and lifecycle management

use crate::engine::{Engine, EngineError};
use crate::input::KeyCode;
use crate::render::{RenderBackend, RenderError};
use thiserror::Error;

/// Application lifecycle trait
///
/// Implement this trait to create your game using the engine. Per frame the
/// engine delivers input events, then calls [`Application::update`], then
/// [`Application::render`] between the backend's begin and end of frame.
pub trait Application {
    /// Initialize the application
    ///
    /// Called once after the engine is initialized. Use this to set up your
    /// initial game state.
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError>;

    /// Update the application
    ///
    /// Called every frame. Implement your game logic here.
    ///
    /// # Arguments
    /// * `engine` - Mutable reference to the engine
    /// * `delta_time` - Time since last frame in seconds
    fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError>;

    /// Render the application
    ///
    /// Called after update with the frame already begun on `backend`. Submit
    /// one draw per visible object.
    fn render(&mut self, backend: &mut dyn RenderBackend) -> Result<(), AppError>;

    /// Handle application events
    ///
    /// Called before update for every event of the frame.
    fn handle_event(&mut self, engine: &mut Engine, event: AppEvent) -> Result<(), AppError> {
        // Default implementation forwards to engine
        engine.handle_event(&event);
        Ok(())
    }

    /// Cleanup the application
    ///
    /// Called once when the main loop has stopped, also when it stopped on an
    /// error.
    fn cleanup(&mut self, engine: &mut Engine);
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Engine error propagated to application level
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Render backend error
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

/// Application events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// Key was pressed
    KeyPressed(KeyCode),

    /// Something outside the application asked the loop to stop
    QuitRequested,
}
