//! Backend abstraction for the rendering system
//!
//! Rasterization lives outside this crate. A backend receives the frame's light
//! and then one [`Drawable`] per object; it reads the model matrix, mesh bytes
//! and material and does whatever its API needs. The engine owns the backend
//! for the whole run and hands it to the application each frame.

use super::lighting::PointLight;
use super::renderable::Drawable;

/// Result type for backend operations
pub type BackendResult<T> = Result<T, RenderError>;

/// Rendering errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// Backend could not be brought up
    #[error("Backend initialization failed: {0}")]
    InitializationFailed(String),

    /// Frame call before `initialize` or after `shutdown`
    #[error("Backend is not initialized")]
    NotInitialized,

    /// Draw or end-frame call outside of a frame
    #[error("No frame in progress")]
    NoFrameInProgress,

    /// Begin-frame call while a frame is already open
    #[error("Frame already in progress")]
    FrameInProgress,

    /// Backend-specific draw failure
    #[error("Draw failed: {0}")]
    DrawFailed(String),
}

/// Counters a backend keeps about the work it was given
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Completed frames
    pub frames: u64,
    /// Draw calls across all frames
    pub draw_calls: u64,
    /// Mesh buffer (re)uploads across all frames, counted per draw slot
    pub mesh_uploads: u64,
}

/// Main rendering backend trait
pub trait RenderBackend {
    /// Acquire backend resources; called once before the first frame
    fn initialize(&mut self) -> BackendResult<()>;

    /// Start a frame lit by `light`
    fn begin_frame(&mut self, light: &PointLight) -> BackendResult<()>;

    /// Draw one object
    fn draw(&mut self, drawable: &dyn Drawable) -> BackendResult<()>;

    /// Finish and present the frame
    fn end_frame(&mut self) -> BackendResult<()>;

    /// Release backend resources; called once after the last frame
    fn shutdown(&mut self) -> BackendResult<()>;

    /// Work counters so far
    fn stats(&self) -> RenderStats {
        RenderStats::default()
    }
}

/// Backend that draws nothing and only keeps count
///
/// Uploads are counted per draw slot, the position of a draw call within its
/// frame. A mesh counts as uploaded the first time a slot is used and whenever
/// the drawable in that slot reports a different revision than last frame.
/// Removing a drawable shifts later ones into earlier slots, so those count as
/// uploads too when their revision differs from the slot's previous occupant.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    initialized: bool,
    in_frame: bool,
    slot: usize,
    uploaded_revisions: Vec<u64>,
    stats: RenderStats,
}

impl HeadlessBackend {
    /// Create a new headless backend
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderBackend for HeadlessBackend {
    fn initialize(&mut self) -> BackendResult<()> {
        log::debug!("Headless backend initialized");
        self.initialized = true;
        Ok(())
    }

    fn begin_frame(&mut self, light: &PointLight) -> BackendResult<()> {
        if !self.initialized {
            return Err(RenderError::NotInitialized);
        }
        if self.in_frame {
            return Err(RenderError::FrameInProgress);
        }
        log::trace!("Frame {} begins, light at {:?}", self.stats.frames, light.world_position());
        self.in_frame = true;
        self.slot = 0;
        Ok(())
    }

    fn draw(&mut self, drawable: &dyn Drawable) -> BackendResult<()> {
        if !self.in_frame {
            return Err(RenderError::NoFrameInProgress);
        }

        let revision = drawable.revision();
        match self.uploaded_revisions.get_mut(self.slot) {
            Some(uploaded) if *uploaded == revision => {}
            Some(uploaded) => {
                *uploaded = revision;
                self.stats.mesh_uploads += 1;
            }
            None => {
                self.uploaded_revisions.push(revision);
                self.stats.mesh_uploads += 1;
            }
        }

        log::trace!(
            "Draw slot {}: {} triangles, {} vertex bytes",
            self.slot,
            drawable.mesh().triangle_count(),
            drawable.mesh().vertex_bytes().len()
        );
        self.slot += 1;
        self.stats.draw_calls += 1;
        Ok(())
    }

    fn end_frame(&mut self) -> BackendResult<()> {
        if !self.in_frame {
            return Err(RenderError::NoFrameInProgress);
        }
        self.in_frame = false;
        self.stats.frames += 1;
        Ok(())
    }

    fn shutdown(&mut self) -> BackendResult<()> {
        if !self.initialized {
            return Err(RenderError::NotInitialized);
        }
        log::debug!(
            "Headless backend shut down after {} frames and {} draw calls",
            self.stats.frames,
            self.stats.draw_calls
        );
        self.initialized = false;
        self.uploaded_revisions.clear();
        Ok(())
    }

    fn stats(&self) -> RenderStats {
        self.stats
    }
}
