//! Walls, floor and pickups
//!
//! Walls and the floor never change after construction. Pickups only ever
//! disappear: they are dropped when the avatar eats them and never come back.

use maze_engine::foundation::math::Point3;
use maze_engine::foundation::transform::Transformable;
use maze_engine::physics::{CollisionMode, CollisionOracle};
use maze_engine::render::{BoxMesh, BoxRenderable, Drawable, Material, SphereMesh, SphereRenderable};

use crate::layout::{LayoutError, LevelLayout};

/// Receives a notification for every eaten pickup
pub trait PickupSink {
    /// `position` is the pickup's world-space center
    fn pickup_eaten(&mut self, position: Point3);
}

/// The playing field
#[derive(Debug, Clone)]
pub struct Maze {
    floor: BoxRenderable,
    walls: Vec<BoxRenderable>,
    pickups: Vec<SphereRenderable>,
    oracle: CollisionOracle,
}

impl Maze {
    /// Build the maze described by `layout`
    ///
    /// Grid cells whose pickup would touch a wall are left empty, so no
    /// pickup ever sits inside a wall.
    pub fn build(layout: &LevelLayout) -> Result<Self, LayoutError> {
        Self::build_with(layout, CollisionOracle::default())
    }

    /// Build with a custom collision oracle
    pub fn build_with(layout: &LevelLayout, oracle: CollisionOracle) -> Result<Self, LayoutError> {
        layout.validate()?;

        let floor = BoxRenderable::new(BoxMesh, Material::wall()).with_transform(layout.floor.transform());
        let wall_template = BoxRenderable::new(BoxMesh, Material::wall());
        let walls: Vec<BoxRenderable> = layout
            .walls
            .iter()
            .map(|placement| wall_template.clone().with_transform(placement.transform()))
            .collect();

        let pickup_template = SphereRenderable::new(SphereMesh::default(), Material::pickup());
        let mut pickups = Vec::with_capacity(layout.pickups.cell_count());
        let mut skipped = 0_usize;
        for position in layout.pickups.positions() {
            let pickup = pickup_template
                .clone()
                .with_transform(layout.pickups.transform_at(position));
            if oracle.first_touching(&pickup, &walls, CollisionMode::Wall).is_some() {
                skipped += 1;
            } else {
                pickups.push(pickup);
            }
        }

        log::info!(
            "Maze built: {} walls, {} pickups ({} grid cells covered by walls)",
            walls.len(),
            pickups.len(),
            skipped
        );

        Ok(Self {
            floor,
            walls,
            pickups,
            oracle,
        })
    }

    /// Whether `avatar`'s front probes are inside any wall, at any height
    pub fn is_colliding_with_wall<T: Transformable + ?Sized>(&self, avatar: &T) -> bool {
        self.oracle
            .first_touching(avatar, &self.walls, CollisionMode::Wall)
            .is_some()
    }

    /// Remove every pickup touching `avatar`, notifying `sink` for each
    ///
    /// Pickups are probed against the avatar's box on all three axes, so an
    /// avatar in mid-jump passes over them. Returns how many were eaten.
    pub fn collect_pickups_touching<T: Transformable + ?Sized>(
        &mut self,
        avatar: &T,
        sink: &mut dyn PickupSink,
    ) -> usize {
        let oracle = &self.oracle;
        let before = self.pickups.len();
        self.pickups.retain(|pickup| {
            let touching = oracle.intersects(pickup, avatar, CollisionMode::Solid);
            if touching {
                sink.pickup_eaten(pickup.world_origin());
            }
            !touching
        });
        before - self.pickups.len()
    }

    /// Everything to draw, in order: floor, pickups, walls
    pub fn renderables(&self) -> Vec<&dyn Drawable> {
        std::iter::once(&self.floor as &dyn Drawable)
            .chain(self.pickups.iter().map(|pickup| pickup as &dyn Drawable))
            .chain(self.walls.iter().map(|wall| wall as &dyn Drawable))
            .collect()
    }

    /// Pickups still in play
    pub fn pickups_remaining(&self) -> usize {
        self.pickups.len()
    }

    /// Whether every pickup has been eaten
    pub fn is_cleared(&self) -> bool {
        self.pickups.is_empty()
    }

    /// Wall renderables
    pub fn walls(&self) -> &[BoxRenderable] {
        &self.walls
    }

    /// Remaining pickup renderables
    pub fn pickups(&self) -> &[SphereRenderable] {
        &self.pickups
    }

    /// Floor renderable
    pub const fn floor(&self) -> &BoxRenderable {
        &self.floor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{PickupGrid, WallPlacement};
    use maze_engine::foundation::math::{Axis, Space};
    use maze_engine::foundation::transform::ModelTransform;

    #[derive(Default)]
    struct Recorder {
        eaten: Vec<Point3>,
    }

    impl PickupSink for Recorder {
        fn pickup_eaten(&mut self, position: Point3) {
            self.eaten.push(position);
        }
    }

    fn single_pickup_layout(wall_z: f32) -> LevelLayout {
        let mut layout = LevelLayout::open_field(PickupGrid {
            half_extent: 0,
            scale: 0.25,
            ..PickupGrid::default()
        });
        layout.walls.push(WallPlacement {
            offset: [0.0, 0.0, wall_z],
            scale: [1.0, 1.0, 1.0],
        });
        layout
    }

    #[test]
    fn test_pickup_on_wall_boundary_is_excluded() {
        // pickup front probe lands at z = 0.25, the wall spans z in [0.25, 2.25]
        let maze = Maze::build(&single_pickup_layout(1.25)).unwrap();
        assert_eq!(maze.pickups_remaining(), 0);
        assert!(maze.is_cleared());

        let maze = Maze::build(&single_pickup_layout(1.5)).unwrap();
        assert_eq!(maze.pickups_remaining(), 1);
    }

    #[test]
    fn test_labyrinth_prefilter() {
        let layout = LevelLayout::labyrinth();
        let maze = Maze::build(&layout).unwrap();
        let oracle = CollisionOracle::default();

        assert_eq!(maze.walls().len(), 20);
        assert!(maze.pickups_remaining() < layout.pickups.cell_count());
        assert!(maze.pickups_remaining() > 0);
        for pickup in maze.pickups() {
            assert_eq!(oracle.first_touching(pickup, maze.walls(), CollisionMode::Wall), None);
        }

        // the cell in the center block is gone, the origin cell is not
        let origins: Vec<Point3> = maze.pickups().iter().map(Transformable::world_origin).collect();
        assert!(origins.contains(&Point3::origin()));
        assert!(!origins.contains(&Point3::new(0.0, 0.0, 2.0)));
    }

    #[test]
    fn test_degenerate_layout_is_rejected() {
        let mut layout = LevelLayout::labyrinth();
        layout.walls[0].scale = [1.0, 0.0, 3.0];
        assert!(matches!(Maze::build(&layout), Err(LayoutError::DegenerateScale { .. })));

        let mut layout = LevelLayout::open_field(PickupGrid::default());
        layout.pickups.half_extent = 1 << 30;
        assert!(matches!(Maze::build(&layout), Err(LayoutError::GridTooLarge { .. })));
    }

    #[test]
    fn test_wall_collision_ignores_height() {
        let maze = Maze::build(&LevelLayout::labyrinth()).unwrap();
        let mut avatar = ModelTransform::new();

        // spawn faces the center block at z in [1, 3]
        assert!(maze.is_colliding_with_wall(&avatar));

        avatar.translate(Axis::Y, 5.0, Space::Global);
        assert!(maze.is_colliding_with_wall(&avatar));

        avatar.rotate(Axis::Y, -std::f32::consts::FRAC_PI_2, Space::Local);
        assert!(!maze.is_colliding_with_wall(&avatar));
    }

    #[test]
    fn test_collect_pickups() {
        let mut maze = Maze::build(&LevelLayout::labyrinth()).unwrap();
        let total = maze.pickups_remaining();
        let mut recorder = Recorder::default();
        let mut avatar = ModelTransform::new();

        assert_eq!(maze.collect_pickups_touching(&avatar, &mut recorder), 1);
        assert_eq!(recorder.eaten, vec![Point3::origin()]);
        assert_eq!(maze.pickups_remaining(), total - 1);

        // eaten pickups stay eaten
        assert_eq!(maze.collect_pickups_touching(&avatar, &mut recorder), 0);

        // a jumping avatar passes over pickups
        avatar.translate(Axis::X, -2.0, Space::Global);
        avatar.translate(Axis::Y, 1.5, Space::Global);
        assert_eq!(maze.collect_pickups_touching(&avatar, &mut recorder), 0);

        avatar.translate(Axis::Y, -1.5, Space::Global);
        assert_eq!(maze.collect_pickups_touching(&avatar, &mut recorder), 1);
        assert_eq!(recorder.eaten.len(), 2);
    }

    #[test]
    fn test_renderables_order() {
        let maze = Maze::build(&LevelLayout::labyrinth()).unwrap();
        let drawables = maze.renderables();

        assert_eq!(drawables.len(), 1 + maze.pickups_remaining() + maze.walls().len());
        assert_eq!(*drawables[0].material(), Material::wall());
        assert_eq!(*drawables[1].material(), Material::pickup());
        assert_eq!(*drawables[drawables.len() - 1].material(), Material::wall());
    }
}
