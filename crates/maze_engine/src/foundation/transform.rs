//! Model-matrix ownership and composable affine operations
//!
//! Every object in the world owns exactly one object-to-world matrix. Callers
//! never write the matrix directly; they compose rotations, translations and
//! scales into it, each one expressed in either the object's own frame
//! ([`Space::Local`]) or the world frame ([`Space::Global`]).

use super::math::{Axis, Mat4, Mat4Ext, Point3, Space, Vec3};

/// Something that owns a model matrix and accepts affine operations
///
/// The required methods define the algebra; everything else is provided in
/// terms of them so that wrappers (renderables, attachments, the avatar) only
/// need to decide where an operation is forwarded.
pub trait Transformable {
    /// Current object-to-world matrix
    fn model_matrix(&self) -> &Mat4;

    /// Rotate by `angle` radians about a principal axis
    ///
    /// A local rotation pivots around the object's own position and
    /// orientation. A global rotation pivots around the world origin.
    fn rotate(&mut self, axis: Axis, angle: f32, space: Space);

    /// Translate by `amount` along a principal axis
    ///
    /// Local translation follows the object's rotated (and scaled) axes.
    /// Global translation follows the world axes.
    fn translate(&mut self, axis: Axis, amount: f32, space: Space);

    /// Scale along one of the object's own axes
    fn scale_axis(&mut self, axis: Axis, factor: f32);

    /// Scale along the local X axis
    fn scale_x(&mut self, factor: f32) {
        self.scale_axis(Axis::X, factor);
    }

    /// Scale along the local Y axis
    fn scale_y(&mut self, factor: f32) {
        self.scale_axis(Axis::Y, factor);
    }

    /// Scale along the local Z axis
    fn scale_z(&mut self, factor: f32) {
        self.scale_axis(Axis::Z, factor);
    }

    /// Scale all three local axes by the same factor
    fn scale_uniform(&mut self, factor: f32) {
        for axis in Axis::ALL {
            self.scale_axis(axis, factor);
        }
    }

    /// Translate by a full offset vector, one axis at a time
    fn translate_by(&mut self, offset: Vec3, space: Space) {
        for axis in Axis::ALL {
            self.translate(axis, offset[axis.index()], space);
        }
    }

    /// Map a point from object space to world space
    fn transform_point(&self, point: &Point3) -> Point3 {
        self.model_matrix().transform_point(point)
    }

    /// World-space position of the object's local origin
    fn world_origin(&self) -> Point3 {
        self.transform_point(&Point3::origin())
    }
}

/// Owned model matrix, starting at identity
#[derive(Debug, Clone, PartialEq)]
pub struct ModelTransform {
    matrix: Mat4,
}

impl Default for ModelTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelTransform {
    /// Create an identity transform
    pub fn new() -> Self {
        Self {
            matrix: Mat4::identity(),
        }
    }

    /// Create a transform that places an object at `offset` with per-axis
    /// `scale`, i.e. `T(offset) * S(scale)`
    pub fn placed(offset: Vec3, scale: Vec3) -> Self {
        let mut transform = Self::new();
        transform.translate_by(offset, Space::Global);
        for axis in Axis::ALL {
            transform.scale_axis(axis, scale[axis.index()]);
        }
        transform
    }

    /// Reset back to identity
    pub fn reset(&mut self) {
        self.matrix = Mat4::identity();
    }

    fn compose(&mut self, generator: &Mat4, space: Space) {
        self.matrix = match space {
            Space::Local => self.matrix * generator,
            Space::Global => generator * self.matrix,
        };
    }
}

impl Transformable for ModelTransform {
    fn model_matrix(&self) -> &Mat4 {
        &self.matrix
    }

    fn rotate(&mut self, axis: Axis, angle: f32, space: Space) {
        debug_assert!(angle.is_finite(), "rotation angle must be finite");
        self.compose(&Mat4::rotation_about(axis, angle), space);
    }

    fn translate(&mut self, axis: Axis, amount: f32, space: Space) {
        debug_assert!(amount.is_finite(), "translation amount must be finite");
        self.compose(&Mat4::translation_along(axis, amount), space);
    }

    fn scale_axis(&mut self, axis: Axis, factor: f32) {
        // A zero factor would make the matrix singular
        debug_assert!(
            factor.is_finite() && factor != 0.0,
            "scale factor must be finite and non-zero, got {factor}"
        );
        self.compose(&Mat4::scaling_along(axis, factor), Space::Local);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants::{HALF_PI, PI};
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    fn scrambled() -> ModelTransform {
        let mut transform = ModelTransform::new();
        transform.translate(Axis::X, 3.0, Space::Global);
        transform.rotate(Axis::Y, 0.7, Space::Local);
        transform.scale_z(2.5);
        transform.translate(Axis::Z, -1.25, Space::Local);
        transform
    }

    #[test]
    fn test_local_rotation_inverse_restores_matrix() {
        for axis in Axis::ALL {
            for &theta in &[0.1_f32, 1.0, -2.3, PI, 5.9] {
                let mut transform = scrambled();
                let original = *transform.model_matrix();

                transform.rotate(axis, theta, Space::Local);
                transform.rotate(axis, -theta, Space::Local);

                assert_relative_eq!(*transform.model_matrix(), original, epsilon = EPSILON);
            }
        }
    }

    #[test]
    fn test_global_rotation_inverse_restores_matrix() {
        let mut transform = scrambled();
        let original = *transform.model_matrix();

        transform.rotate(Axis::Y, 1.3, Space::Global);
        transform.rotate(Axis::Y, -1.3, Space::Global);

        assert_relative_eq!(*transform.model_matrix(), original, epsilon = EPSILON);
    }

    #[test]
    fn test_local_rotation_pivots_on_object() {
        let mut transform = ModelTransform::new();
        transform.translate(Axis::X, 2.0, Space::Global);
        transform.rotate(Axis::Y, HALF_PI, Space::Local);

        assert_relative_eq!(transform.world_origin(), Point3::new(2.0, 0.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_global_rotation_pivots_on_world_origin() {
        let mut transform = ModelTransform::new();
        transform.translate(Axis::X, 2.0, Space::Global);
        transform.rotate(Axis::Y, HALF_PI, Space::Global);

        assert_relative_eq!(transform.world_origin(), Point3::new(0.0, 0.0, -2.0), epsilon = EPSILON);
    }

    #[test]
    fn test_local_translation_follows_rotation() {
        let mut transform = ModelTransform::new();
        transform.rotate(Axis::Y, HALF_PI, Space::Local);
        transform.translate(Axis::Z, 1.0, Space::Local);

        assert_relative_eq!(transform.world_origin(), Point3::new(1.0, 0.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_global_translation_ignores_rotation() {
        let mut transform = ModelTransform::new();
        transform.rotate(Axis::Y, HALF_PI, Space::Local);
        transform.translate(Axis::Z, 1.0, Space::Global);

        assert_relative_eq!(transform.world_origin(), Point3::new(0.0, 0.0, 1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_local_translation_is_scaled() {
        let mut transform = ModelTransform::new();
        transform.scale_uniform(0.5);
        transform.translate(Axis::Y, 4.0, Space::Local);

        assert_relative_eq!(transform.world_origin(), Point3::new(0.0, 2.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_placed_matches_offset_and_scale() {
        let transform = ModelTransform::placed(Vec3::new(6.0, 0.0, 4.0), Vec3::new(1.0, 1.0, 3.0));

        let corner = transform.transform_point(&Point3::new(1.0, 1.0, -1.0));
        assert_relative_eq!(corner, Point3::new(7.0, 1.0, 1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_composite_stays_invertible() {
        let transform = scrambled();
        let inverse = transform
            .model_matrix()
            .try_inverse()
            .expect("composed transform should be invertible");

        assert_relative_eq!(
            transform.model_matrix() * inverse,
            Mat4::identity(),
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_reset() {
        let mut transform = scrambled();
        transform.reset();
        assert_eq!(*transform.model_matrix(), Mat4::identity());
    }
}
