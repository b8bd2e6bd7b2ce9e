//! Point light source handed to the backend every frame

use super::material::Rgba;
use crate::foundation::math::{Axis, Mat4, Space, Vec4};
use crate::foundation::transform::{ModelTransform, Transformable};

/// Point light with its own placement matrix
///
/// The light keeps a homogeneous rest position and a matrix that is moved
/// around in world space: rotations and translations are always global,
/// scaling is local. The shader-side position is `matrix * position`.
#[derive(Debug, Clone, PartialEq)]
pub struct PointLight {
    /// Homogeneous rest position
    pub position: Vec4,
    /// Ambient color
    pub ambient: Rgba,
    /// Diffuse color
    pub diffuse: Rgba,
    /// Specular color
    pub specular: Rgba,
    /// Whether the diffuse term contributes
    pub diffuse_enabled: bool,
    /// Whether the specular term contributes
    pub specular_enabled: bool,
    placement: ModelTransform,
}

impl Default for PointLight {
    fn default() -> Self {
        Self::at(Vec4::new(0.0, 15.0, -15.0, 1.0))
    }
}

impl PointLight {
    /// Create a white light at `position` with a grey ambient term
    pub fn at(position: Vec4) -> Self {
        Self {
            position,
            ambient: [0.5, 0.5, 0.5, 1.0],
            diffuse: [1.0, 1.0, 1.0, 1.0],
            specular: [1.0, 1.0, 1.0, 1.0],
            diffuse_enabled: true,
            specular_enabled: true,
            placement: ModelTransform::new(),
        }
    }

    /// Rotate the light about a world axis
    pub fn rotate(&mut self, axis: Axis, angle: f32) {
        self.placement.rotate(axis, angle, Space::Global);
    }

    /// Move the light along a world axis
    pub fn translate(&mut self, axis: Axis, amount: f32) {
        self.placement.translate(axis, amount, Space::Global);
    }

    /// Scale the light's placement along one of its own axes
    pub fn scale_axis(&mut self, axis: Axis, factor: f32) {
        self.placement.scale_axis(axis, factor);
    }

    /// Placement matrix (uploaded next to the rest position)
    pub fn placement_matrix(&self) -> &Mat4 {
        self.placement.model_matrix()
    }

    /// Position after placement
    pub fn world_position(&self) -> Vec4 {
        self.placement.model_matrix() * self.position
    }
}
