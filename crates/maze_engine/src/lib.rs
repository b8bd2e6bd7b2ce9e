//! # Maze Engine
//!
//! Transform and collision core for small real-time 3D games.
//!
//! ## Features
//!
//! - **Transformable objects**: one model matrix per object, composed through
//!   local or global rotations, translations and scales
//! - **Procedural meshes**: boxes and UV spheres, including a sphere with an
//!   animated wedge cut out of it
//! - **Rigid attachments**: children that follow a parent by replaying its
//!   operations
//! - **Probe collision**: a cheap front-face probe test against axis-aligned
//!   obstacles, with a wall mode that ignores height
//! - **Backend seam**: rendering is a trait; a headless backend ships in-tree
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use maze_engine::prelude::*;
//!
//! struct MyApp {
//!     cube: BoxRenderable,
//! }
//!
//! impl Application for MyApp {
//!     fn initialize(&mut self, _engine: &mut Engine) -> Result<(), AppError> {
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, _engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
//!         self.cube.rotate(Axis::Y, 0.01, Space::Local);
//!         Ok(())
//!     }
//!
//!     fn render(&mut self, backend: &mut dyn RenderBackend) -> Result<(), AppError> {
//!         backend.draw(&self.cube)?;
//!         Ok(())
//!     }
//!
//!     fn cleanup(&mut self, _engine: &mut Engine) {}
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut app = MyApp {
//!         cube: BoxRenderable::new(BoxMesh, Material::wall()),
//!     };
//!     Engine::run(
//!         EngineConfig::default(),
//!         Box::new(HeadlessBackend::new()),
//!         &mut app,
//!         &mut NoInput,
//!     )?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod foundation;
pub mod input;
pub mod physics;
pub mod render;
pub mod scene;

mod application;
mod engine;

pub use application::{AppError, AppEvent, Application};
pub use engine::{Engine, EngineConfig, EngineError, RunSummary, StopReason};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        foundation::{
            math::{Axis, Mat4, Point3, Space, Vec3},
            time::Timer,
            transform::{ModelTransform, Transformable},
        },
        input::{InputSource, KeyCode, NoInput, ScriptedInput},
        physics::{CollisionMode, CollisionOracle},
        render::{
            BoxMesh, BoxRenderable, Drawable, HeadlessBackend, Material, Mesh, PointLight, RenderBackend,
            RenderError, SphereMesh, SphereParams, SphereRenderable,
        },
        scene::RigidAttachment,
        AppError, AppEvent, Application, Engine, EngineConfig, EngineError, RunSummary,
    };
}
