//! Core engine implementation
//!
//! The engine owns the render backend and the frame timer and drives a
//! single-threaded loop: poll input, update, render. There is no fixed
//! timestep; one simulation step is one frame.

use crate::{
    application::{AppEvent, Application},
    foundation::time::Timer,
    input::{InputSource, KeyCode},
    render::{PointLight, RenderBackend, RenderError, RenderStats},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main engine struct
///
/// The engine coordinates the backend and the main loop. Applications get it
/// mutably during initialize, update and event handling.
pub struct Engine {
    /// Frame lighting, handed to the backend at the start of every frame
    pub light: PointLight,

    backend: Box<dyn RenderBackend>,
    timer: Timer,
    config: EngineConfig,
    running: bool,
    frame: u64,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("running", &self.running)
            .field("frame", &self.frame)
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Create a new engine instance and initialize the backend
    pub fn new(config: EngineConfig, mut backend: Box<dyn RenderBackend>) -> Result<Self, EngineError> {
        log::info!("Initializing engine...");

        backend
            .initialize()
            .map_err(|e| EngineError::InitializationFailed(format!("Render backend: {e}")))?;

        Ok(Self {
            light: PointLight::default(),
            backend,
            timer: Timer::new(),
            config,
            running: true,
            frame: 0,
        })
    }

    /// Run the engine main loop with the given application
    ///
    /// Returns once the application (or an Escape press) requests shutdown or
    /// the configured frame limit is reached. Cleanup and backend shutdown run
    /// on every exit path once the backend is up, including errors.
    pub fn run<A: Application + ?Sized>(
        config: EngineConfig,
        backend: Box<dyn RenderBackend>,
        app: &mut A,
        input: &mut dyn InputSource,
    ) -> Result<RunSummary, EngineError> {
        let mut engine = Self::new(config, backend)?;

        let outcome = app
            .initialize(&mut engine)
            .map_err(|e| EngineError::ApplicationError(format!("App initialization: {e}")))
            .and_then(|()| engine.main_loop(app, input));

        app.cleanup(&mut engine);
        let shutdown = engine.backend.shutdown();
        if let Err(e) = &outcome {
            log::error!("Main loop aborted: {e}");
        }
        let stop = outcome?;
        shutdown?;

        let summary = RunSummary {
            frames: engine.frame,
            elapsed_secs: engine.timer.total_time(),
            average_fps: engine.timer.average_fps(),
            render: engine.backend.stats(),
            stop,
        };
        log::info!(
            "Engine shutdown complete: {} frames, {:.1} fps average",
            summary.frames,
            summary.average_fps
        );
        Ok(summary)
    }

    fn main_loop<A: Application + ?Sized>(
        &mut self,
        app: &mut A,
        input: &mut dyn InputSource,
    ) -> Result<StopReason, EngineError> {
        log::info!("Starting main loop...");

        while self.running {
            if self.config.max_frames.is_some_and(|limit| self.frame >= limit) {
                log::info!("Frame limit of {} reached", self.frame);
                return Ok(StopReason::FrameLimit);
            }

            self.timer.update();
            let delta_time = self.timer.delta_time();

            for key in input.poll(self.frame) {
                log::debug!("Frame {}: key {key:?}", self.frame);
                app.handle_event(self, AppEvent::KeyPressed(key))
                    .map_err(|e| EngineError::ApplicationError(format!("App event: {e}")))?;
            }

            app.update(self, delta_time)
                .map_err(|e| EngineError::ApplicationError(format!("App update: {e}")))?;

            self.render_frame(app)?;
            self.frame += 1;
        }

        Ok(StopReason::Quit)
    }

    fn render_frame<A: Application + ?Sized>(&mut self, app: &mut A) -> Result<(), EngineError> {
        self.backend.begin_frame(&self.light)?;
        app.render(self.backend.as_mut())
            .map_err(|e| EngineError::ApplicationError(format!("App render: {e}")))?;
        self.backend.end_frame()?;
        Ok(())
    }

    /// Handle an application event
    pub fn handle_event(&mut self, event: &AppEvent) {
        match event {
            AppEvent::KeyPressed(KeyCode::Escape) | AppEvent::QuitRequested => self.quit(),
            AppEvent::KeyPressed(_) => {}
        }
    }

    /// Request engine shutdown; the current frame still completes
    pub fn quit(&mut self) {
        log::info!("Engine shutdown requested");
        self.running = false;
    }

    /// Whether the loop will run another frame
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Index of the frame being processed
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// Get the current frame delta time
    pub const fn delta_time(&self) -> f32 {
        self.timer.delta_time()
    }

    /// Engine configuration
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Default log level when `RUST_LOG` is unset
    pub log_level: String,

    /// Stop after this many frames; run until quit when absent
    pub max_frames: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            max_frames: None,
        }
    }
}

/// Why the main loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The application or the user asked to quit
    Quit,
    /// `max_frames` was reached
    FrameLimit,
}

/// What a finished run did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    /// Frames simulated and rendered
    pub frames: u64,
    /// Wall-clock seconds spent in the loop
    pub elapsed_secs: f32,
    /// Average frames per second
    pub average_fps: f32,
    /// Backend counters at shutdown
    pub render: RenderStats,
    /// Why the loop ended
    pub stop: StopReason,
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Initialization error
    #[error("Engine initialization failed: {0}")]
    InitializationFailed(String),

    /// Rendering error
    #[error("Rendering error: {0}")]
    RenderError(#[from] RenderError),

    /// Application error
    #[error("Application error: {0}")]
    ApplicationError(String),
}
