//! Math utilities and types
//!
//! Provides the fundamental math types used by the transform, mesh and
//! collision code. Matrices follow the column-vector convention: a point is
//! transformed as `M * p`.

use serde::{Deserialize, Serialize};

pub use nalgebra::{Matrix4, Unit, Vector3, Vector4};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// One of the three principal axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// The X axis
    X,
    /// The Y axis (up)
    Y,
    /// The Z axis
    Z,
}

impl Axis {
    /// All axes in X, Y, Z order
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// Component index of this axis in a vector
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// Unit vector along this axis
    pub fn unit(self) -> Unit<Vec3> {
        match self {
            Self::X => Vec3::x_axis(),
            Self::Y => Vec3::y_axis(),
            Self::Z => Vec3::z_axis(),
        }
    }

    /// Vector of the given length along this axis
    pub fn vector(self, length: f32) -> Vec3 {
        self.unit().into_inner() * length
    }
}

/// Reference frame a transform operation is expressed in
///
/// `Local` operations compose on the right of the model matrix and therefore
/// act in the object's own (already rotated and scaled) frame. `Global`
/// operations compose on the left and act in world space, pivoting at the
/// world origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Space {
    /// Object frame
    #[default]
    Local,
    /// World frame
    Global,
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;
}

/// Math utility functions
pub mod utils {
    use super::constants::{PI, TAU};

    /// Wrap an angle into the half-open range (-PI, PI]
    pub fn wrap_angle(angle: f32) -> f32 {
        let wrapped = angle.rem_euclid(TAU);
        if wrapped > PI {
            wrapped - TAU
        } else {
            wrapped
        }
    }
}

/// Extension trait for Mat4 with per-axis affine generators
pub trait Mat4Ext {
    /// Rotation of `angle` radians about a principal axis
    fn rotation_about(axis: Axis, angle: f32) -> Mat4;

    /// Translation of `amount` along a principal axis
    fn translation_along(axis: Axis, amount: f32) -> Mat4;

    /// Scaling by `factor` along a principal axis, identity on the others
    fn scaling_along(axis: Axis, factor: f32) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn rotation_about(axis: Axis, angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&axis.unit(), angle)
    }

    fn translation_along(axis: Axis, amount: f32) -> Mat4 {
        Mat4::new_translation(&axis.vector(amount))
    }

    fn scaling_along(axis: Axis, factor: f32) -> Mat4 {
        let mut factors = Vec3::new(1.0, 1.0, 1.0);
        factors[axis.index()] = factor;
        Mat4::new_nonuniform_scaling(&factors)
    }
}

#[cfg(test)]
mod tests {
    use super::constants::{HALF_PI, PI};
    use super::utils::wrap_angle;
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_axis_vectors() {
        assert_eq!(Axis::X.vector(2.0), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(Axis::Y.vector(-1.0), Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(Axis::Z.index(), 2);
    }

    #[test]
    fn test_rotation_about_y_is_right_handed() {
        // +X rotated a quarter turn about +Y ends up on -Z
        let rotated = Mat4::rotation_about(Axis::Y, HALF_PI).transform_vector(&Vec3::x());
        assert_relative_eq!(rotated, Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_scaling_along_touches_one_axis() {
        let scaled = Mat4::scaling_along(Axis::Z, 3.0).transform_point(&Point3::new(1.0, 1.0, 1.0));
        assert_relative_eq!(scaled, Point3::new(1.0, 1.0, 3.0));
    }

    #[test]
    fn test_wrap_angle() {
        assert_relative_eq!(wrap_angle(-3.0 * HALF_PI), HALF_PI, epsilon = 1e-6);
        assert_relative_eq!(wrap_angle(-PI), PI, epsilon = 1e-6);
        assert_relative_eq!(wrap_angle(PI), PI, epsilon = 1e-6);
        assert_relative_eq!(wrap_angle(0.25), 0.25);
    }
}
