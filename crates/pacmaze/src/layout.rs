//! Static level description
//!
//! A layout is pure data: where the floor, the walls and the pickup grid go.
//! [`Maze::build`](crate::maze::Maze::build) turns it into renderables.

use maze_engine::foundation::math::Vec3;
use maze_engine::foundation::transform::ModelTransform;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Layout errors, reported when a maze is built
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// A box would collapse or turn inside out
    #[error("{what} has a degenerate scale {scale:?}")]
    DegenerateScale {
        /// Which part of the layout
        what: String,
        /// Offending scale
        scale: [f32; 3],
    },

    /// A position is not a finite number
    #[error("{what} has a non-finite offset {offset:?}")]
    NonFiniteOffset {
        /// Which part of the layout
        what: String,
        /// Offending offset
        offset: [f32; 3],
    },

    /// The pickup grid has more cells than a maze can hold
    #[error("pickup grid half extent {half_extent} exceeds {max}")]
    GridTooLarge {
        /// Requested half extent
        half_extent: i32,
        /// Largest accepted half extent
        max: i32,
    },
}

/// Placement of a canonical box: `T(offset) * S(scale)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallPlacement {
    /// Center in world space
    pub offset: [f32; 3],
    /// Half-extent along each axis
    pub scale: [f32; 3],
}

impl WallPlacement {
    /// Wall standing on the pickup plane, one unit high
    pub const fn on_floor(x: f32, z: f32, scale_x: f32, scale_z: f32) -> Self {
        Self {
            offset: [x, 0.0, z],
            scale: [scale_x, 1.0, scale_z],
        }
    }

    /// Model transform for the box
    pub fn transform(&self) -> ModelTransform {
        ModelTransform::placed(Vec3::from(self.offset), Vec3::from(self.scale))
    }

    fn validate(&self, what: impl FnOnce() -> String) -> Result<(), LayoutError> {
        if !self.offset.iter().all(|c| c.is_finite()) {
            return Err(LayoutError::NonFiniteOffset {
                what: what(),
                offset: self.offset,
            });
        }
        if !self.scale.iter().all(|&c| c.is_finite() && c > 0.0) {
            return Err(LayoutError::DegenerateScale {
                what: what(),
                scale: self.scale,
            });
        }
        Ok(())
    }
}

/// Square grid of pickups centered on the world origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickupGrid {
    /// Cells run from `-half_extent` to `half_extent` on X and Z
    pub half_extent: i32,
    /// Distance between neighbouring pickups
    pub spacing: f32,
    /// Height of the pickup centers
    pub height: f32,
    /// Uniform scale of each pickup sphere
    pub scale: f32,
}

impl Default for PickupGrid {
    fn default() -> Self {
        Self {
            half_extent: 8,
            spacing: 2.0,
            height: 0.0,
            scale: 0.2,
        }
    }
}

impl PickupGrid {
    /// Largest accepted `half_extent`
    pub const MAX_HALF_EXTENT: i32 = 512;

    /// Pickup centers, X-major
    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        let range = -self.half_extent..=self.half_extent;
        range.clone().flat_map(move |i| {
            range
                .clone()
                .map(move |j| Vec3::new(i as f32 * self.spacing, self.height, j as f32 * self.spacing))
        })
    }

    /// Model transform of a pickup at `position`
    pub fn transform_at(&self, position: Vec3) -> ModelTransform {
        ModelTransform::placed(position, Vec3::repeat(self.scale))
    }

    /// Number of grid cells, saturating at `usize::MAX`
    pub fn cell_count(&self) -> usize {
        let side = usize::try_from(self.half_extent)
            .map_or(0, |half| half.saturating_mul(2).saturating_add(1));
        side.saturating_mul(side)
    }
}

/// Complete level description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelLayout {
    /// Floor slab
    pub floor: WallPlacement,
    /// Pickup grid; cells inside walls are dropped when the maze is built
    pub pickups: PickupGrid,
    /// Wall boxes
    pub walls: Vec<WallPlacement>,
}

impl Default for LevelLayout {
    fn default() -> Self {
        Self::labyrinth()
    }
}

impl LevelLayout {
    /// The shipped labyrinth: a 17 x 17 pickup grid inside a bordered maze
    pub fn labyrinth() -> Self {
        let walls = vec![
            WallPlacement::on_floor(6.0, 4.0, 1.0, 3.0),
            WallPlacement::on_floor(6.0, -2.0, 7.0, 1.0),
            WallPlacement::on_floor(0.0, 4.0, 3.0, 1.0),
            WallPlacement::on_floor(4.0, 8.0, 9.0, 1.0),
            WallPlacement::on_floor(4.0, 12.0, 7.0, 1.0),
            WallPlacement::on_floor(-6.0, 8.0, 1.0, 3.0),
            WallPlacement::on_floor(-6.0, -4.0, 1.0, 7.0),
            WallPlacement::on_floor(2.0, -6.0, 5.0, 1.0),
            WallPlacement::on_floor(2.0, -10.0, 3.0, 1.0),
            WallPlacement::on_floor(6.0, -12.0, 1.0, 3.0),
            WallPlacement::on_floor(10.0, -12.0, 3.0, 1.0),
            WallPlacement::on_floor(-10.0, 4.0, 1.0, 3.0),
            WallPlacement::on_floor(-10.0, -4.0, 1.0, 3.0),
            WallPlacement::on_floor(-12.0, -12.0, 3.0, 1.0),
            WallPlacement::on_floor(-10.0, 10.0, 3.0, 1.0),
            // border
            WallPlacement::on_floor(16.0, 0.0, 1.0, 17.0),
            WallPlacement::on_floor(-16.0, 0.0, 1.0, 17.0),
            WallPlacement::on_floor(0.0, -16.0, 15.0, 1.0),
            WallPlacement::on_floor(0.0, 16.0, 15.0, 1.0),
            // center block
            WallPlacement::on_floor(0.0, 2.0, 1.0, 1.0),
        ];

        Self {
            floor: WallPlacement {
                offset: [0.0, -2.0, 0.0],
                scale: [16.0, 1.0, 16.0],
            },
            pickups: PickupGrid::default(),
            walls,
        }
    }

    /// Layout with a floor and pickups but no walls
    pub fn open_field(pickups: PickupGrid) -> Self {
        Self {
            pickups,
            walls: Vec::new(),
            ..Self::labyrinth()
        }
    }

    /// Reject boxes that would make a singular or non-finite model matrix, and
    /// pickup grids too large to allocate
    pub fn validate(&self) -> Result<(), LayoutError> {
        self.floor.validate(|| "floor".to_string())?;
        for (index, wall) in self.walls.iter().enumerate() {
            wall.validate(|| format!("wall #{index}"))?;
        }

        let grid = &self.pickups;
        if grid.half_extent > PickupGrid::MAX_HALF_EXTENT {
            return Err(LayoutError::GridTooLarge {
                half_extent: grid.half_extent,
                max: PickupGrid::MAX_HALF_EXTENT,
            });
        }
        if !(grid.scale.is_finite() && grid.scale > 0.0) {
            return Err(LayoutError::DegenerateScale {
                what: "pickup grid".to_string(),
                scale: [grid.scale; 3],
            });
        }
        if !(grid.spacing.is_finite() && grid.height.is_finite()) {
            return Err(LayoutError::NonFiniteOffset {
                what: "pickup grid".to_string(),
                offset: [grid.spacing, grid.height, grid.spacing],
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use maze_engine::foundation::math::Point3;
    use maze_engine::foundation::transform::Transformable;

    #[test]
    fn test_labyrinth_shape() {
        let layout = LevelLayout::labyrinth();
        assert_eq!(layout.walls.len(), 20);
        assert_eq!(layout.pickups.cell_count(), 17 * 17);
        assert_eq!(layout.pickups.positions().count(), 17 * 17);
        assert!(layout.validate().is_ok());
    }

    #[test]
    fn test_grid_positions() {
        let grid = PickupGrid::default();
        let positions: Vec<Vec3> = grid.positions().collect();
        assert_eq!(positions[0], Vec3::new(-16.0, 0.0, -16.0));
        assert_eq!(positions[1], Vec3::new(-16.0, 0.0, -14.0));
        assert_eq!(positions[positions.len() - 1], Vec3::new(16.0, 0.0, 16.0));
    }

    #[test]
    fn test_wall_transform() {
        let wall = WallPlacement::on_floor(6.0, -2.0, 7.0, 1.0);
        let far_corner = wall.transform().transform_point(&Point3::new(1.0, 1.0, 1.0));
        assert_relative_eq!(far_corner, Point3::new(13.0, 1.0, -1.0), epsilon = 1e-5);
    }

    #[test]
    fn test_degenerate_wall_is_rejected() {
        let mut layout = LevelLayout::labyrinth();
        layout.walls[3].scale[2] = 0.0;

        let err = layout.validate().unwrap_err();
        assert_eq!(
            err,
            LayoutError::DegenerateScale {
                what: "wall #3".to_string(),
                scale: [9.0, 1.0, 0.0],
            }
        );
        assert!(err.to_string().contains("wall #3"));
    }

    #[test]
    fn test_degenerate_floor_and_grid_are_rejected() {
        let mut layout = LevelLayout::labyrinth();
        layout.floor.scale[0] = -16.0;
        assert!(matches!(layout.validate(), Err(LayoutError::DegenerateScale { .. })));

        let mut layout = LevelLayout::labyrinth();
        layout.pickups.scale = f32::NAN;
        assert!(matches!(layout.validate(), Err(LayoutError::DegenerateScale { .. })));

        let mut layout = LevelLayout::labyrinth();
        layout.walls[0].offset[1] = f32::INFINITY;
        assert!(matches!(layout.validate(), Err(LayoutError::NonFiniteOffset { .. })));
    }

    #[test]
    fn test_oversized_grid_is_rejected() {
        let mut layout = LevelLayout::labyrinth();
        layout.pickups.half_extent = PickupGrid::MAX_HALF_EXTENT;
        assert!(layout.validate().is_ok());

        layout.pickups.half_extent = i32::MAX;
        assert_eq!(
            layout.validate(),
            Err(LayoutError::GridTooLarge {
                half_extent: i32::MAX,
                max: PickupGrid::MAX_HALF_EXTENT,
            })
        );
    }

    #[test]
    fn test_negative_half_extent_is_an_empty_grid() {
        let grid = PickupGrid {
            half_extent: -1,
            ..PickupGrid::default()
        };
        assert_eq!(grid.cell_count(), 0);
        assert_eq!(grid.positions().count(), 0);
    }
}
