//! Drawable game objects: a transform, a generated mesh and a material

use super::material::Material;
use super::mesh::Mesh;
use super::primitives::{BoxMesh, MeshGenerator, SphereMesh};
use crate::foundation::math::{Axis, Mat4, Space};
use crate::foundation::transform::{ModelTransform, Transformable};

/// Render-facing view of an object
///
/// This is all a backend gets to see: where the object is, what it looks like
/// and a revision counter that changes whenever the mesh is replaced.
pub trait Drawable: Transformable {
    /// Current geometry
    fn mesh(&self) -> &Mesh;

    /// Surface material
    fn material(&self) -> &Material;

    /// Mesh revision, bumped on every regeneration
    fn revision(&self) -> u64;
}

/// An object whose mesh is produced by a [`MeshGenerator`] strategy
#[derive(Debug, Clone)]
pub struct Renderable<G> {
    transform: ModelTransform,
    generator: G,
    mesh: Mesh,
    material: Material,
    revision: u64,
}

/// Box-shaped renderable (walls, floor)
pub type BoxRenderable = Renderable<BoxMesh>;

/// Sphere-shaped renderable (pickups, avatar, eyes)
pub type SphereRenderable = Renderable<SphereMesh>;

impl<G: MeshGenerator> Renderable<G> {
    /// Create a renderable at the world origin and generate its mesh
    pub fn new(generator: G, material: Material) -> Self {
        let mesh = generator.generate();
        Self {
            transform: ModelTransform::new(),
            generator,
            mesh,
            material,
            revision: 0,
        }
    }

    /// Replace the starting transform
    #[must_use]
    pub fn with_transform(mut self, transform: ModelTransform) -> Self {
        self.transform = transform;
        self
    }

    /// Swap in a new generator and replace the mesh wholesale
    pub fn regenerate_with(&mut self, generator: G) {
        self.mesh = generator.generate();
        self.generator = generator;
        self.revision += 1;
    }

    /// Generator that produced the current mesh
    pub const fn generator(&self) -> &G {
        &self.generator
    }

    /// Replace the material
    pub fn set_material(&mut self, material: Material) {
        self.material = material;
    }

    /// Owned transform
    pub const fn transform(&self) -> &ModelTransform {
        &self.transform
    }
}

impl<G> Transformable for Renderable<G> {
    fn model_matrix(&self) -> &Mat4 {
        self.transform.model_matrix()
    }

    fn rotate(&mut self, axis: Axis, angle: f32, space: Space) {
        self.transform.rotate(axis, angle, space);
    }

    fn translate(&mut self, axis: Axis, amount: f32, space: Space) {
        self.transform.translate(axis, amount, space);
    }

    fn scale_axis(&mut self, axis: Axis, factor: f32) {
        self.transform.scale_axis(axis, factor);
    }
}

impl<G> Drawable for Renderable<G> {
    fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    fn material(&self) -> &Material {
        &self.material
    }

    fn revision(&self) -> u64 {
        self.revision
    }
}
