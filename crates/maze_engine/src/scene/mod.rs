//! Scene composition helpers

pub mod attachment;

pub use attachment::RigidAttachment;
