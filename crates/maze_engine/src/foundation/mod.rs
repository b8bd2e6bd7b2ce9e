//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Math types and operations
//! - The transformable model-matrix abstraction
//! - Time management
//! - Logging utilities

pub mod logging;
pub mod math;
pub mod time;
pub mod transform;
