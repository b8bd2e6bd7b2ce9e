//! Collision queries
//!
//! No dynamics live here: objects move only through their transforms, and the
//! only question asked is whether a mover touches an obstacle.

pub mod collision;

pub use collision::{CollisionMode, CollisionOracle, ProbeSet, WorldInterval};
