//! Rendering data model
//!
//! Everything here is backend-agnostic: meshes are generated on the CPU,
//! renderables pair them with a transform and a material, and a
//! [`RenderBackend`] implementation decides what drawing actually means.

pub mod backend;
pub mod lighting;
pub mod material;
pub mod mesh;
pub mod primitives;
pub mod renderable;

pub use backend::{BackendResult, HeadlessBackend, RenderBackend, RenderError, RenderStats};
pub use lighting::PointLight;
pub use material::{Material, Rgba};
pub use mesh::{Mesh, Vertex};
pub use primitives::{make_box, make_sphere, BoxMesh, MeshGenerator, SphereMesh, SphereParams};
pub use renderable::{BoxRenderable, Drawable, Renderable, SphereRenderable};
