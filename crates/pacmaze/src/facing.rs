//! The four directions the avatar can face

use maze_engine::foundation::math::constants::{HALF_PI, PI};
use maze_engine::foundation::math::utils::wrap_angle;
use maze_engine::foundation::math::Vec3;
use serde::{Deserialize, Serialize};

/// Canonical facing of the avatar on the floor plane
///
/// Forward points away from the camera (up arrow) and is world -Z. The avatar
/// spawns facing [`FacingDirection::Backward`], i.e. its local +Z axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FacingDirection {
    /// World -Z
    Forward,
    /// World +Z
    #[default]
    Backward,
    /// World -X
    Left,
    /// World +X
    Right,
}

impl FacingDirection {
    /// All four facings
    pub const ALL: [Self; 4] = [Self::Forward, Self::Backward, Self::Left, Self::Right];

    /// Unit vector in world space
    pub fn vector(self) -> Vec3 {
        match self {
            Self::Forward => Vec3::new(0.0, 0.0, -1.0),
            Self::Backward => Vec3::new(0.0, 0.0, 1.0),
            Self::Left => Vec3::new(-1.0, 0.0, 0.0),
            Self::Right => Vec3::new(1.0, 0.0, 0.0),
        }
    }

    /// Rotation about +Y that takes the avatar's local +Z onto this facing
    pub fn yaw(self) -> f32 {
        match self {
            Self::Backward => 0.0,
            Self::Right => HALF_PI,
            Self::Forward => PI,
            Self::Left => -HALF_PI,
        }
    }

    /// Shortest signed rotation about +Y from `self` to `target`
    ///
    /// Zero when already facing `target`; a half turn is always `+PI`.
    pub fn turn_angle(self, target: Self) -> f32 {
        if self == target {
            0.0
        } else {
            wrap_angle(target.yaw() - self.yaw())
        }
    }
}
