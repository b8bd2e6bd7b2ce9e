//! Probe-point collision test
//!
//! Each object is treated as the canonical `[-1, 1]^3` box pushed through its
//! model matrix. The obstacle side is reduced to the world-space interval
//! spanned by two opposite corners; the moving side is reduced to a handful
//! of probe points on its front face. A hit is any probe inside the interval.
//!
//! This is deliberately not an oriented-box test: it is exact only for
//! obstacles that are axis-aligned in world space, which every wall and pickup
//! is. The moving object always faces its direction of travel, so probing the
//! front face is enough.

use crate::foundation::math::{Axis, Point3};
use crate::foundation::transform::Transformable;

/// How the obstacle's Y extent is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CollisionMode {
    /// Probes must be inside the obstacle on all three axes
    #[default]
    Solid,
    /// Y is ignored: a wall blocks no matter how high the mover jumps
    Wall,
}

impl CollisionMode {
    /// Axes the containment test looks at
    pub const fn axes(self) -> &'static [Axis] {
        match self {
            Self::Solid => &[Axis::X, Axis::Y, Axis::Z],
            Self::Wall => &[Axis::X, Axis::Z],
        }
    }
}

/// Per-axis world-space extent of an obstacle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldInterval {
    min: Point3,
    max: Point3,
}

impl WorldInterval {
    /// Object-space corners whose images span the interval
    pub const CORNERS: [[f32; 3]; 2] = [[-1.0, -1.0, 1.0], [1.0, 1.0, -1.0]];

    /// Interval of `object` after its model matrix
    ///
    /// The transformed corners may come out in any order (a negative scale
    /// flips them), so min and max are sorted per axis.
    pub fn of<T: Transformable + ?Sized>(object: &T) -> Self {
        let [first, second] = Self::CORNERS.map(|corner| object.transform_point(&Point3::from(corner)));
        Self {
            min: first.inf(&second),
            max: first.sup(&second),
        }
    }

    /// Lower corner
    pub const fn min(&self) -> &Point3 {
        &self.min
    }

    /// Upper corner
    pub const fn max(&self) -> &Point3 {
        &self.max
    }

    /// Whether `point` lies inside, bounds included, on the axes `mode` checks
    pub fn contains(&self, point: &Point3, mode: CollisionMode) -> bool {
        mode.axes().iter().all(|axis| {
            let i = axis.index();
            self.min[i] <= point[i] && point[i] <= self.max[i]
        })
    }
}

/// Object-space probe points of the moving object
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeSet {
    points: Vec<Point3>,
}

impl Default for ProbeSet {
    fn default() -> Self {
        Self::front(0.6)
    }
}

impl ProbeSet {
    /// Center of the front (+Z) face plus one point either side at `spread`
    pub fn front(spread: f32) -> Self {
        Self::new(vec![
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(spread, 0.0, 1.0),
            Point3::new(-spread, 0.0, 1.0),
        ])
    }

    /// Arbitrary probe points
    ///
    /// # Panics
    ///
    /// When `points` is empty, since such a set could never collide.
    pub fn new(points: Vec<Point3>) -> Self {
        assert!(!points.is_empty(), "a probe set needs at least one point");
        Self { points }
    }

    /// Probe points in object space
    pub fn points(&self) -> &[Point3] {
        &self.points
    }
}

/// Collision predicate between a moving object and obstacles
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionOracle {
    probes: ProbeSet,
}

impl CollisionOracle {
    /// Create an oracle using custom probes
    pub const fn new(probes: ProbeSet) -> Self {
        Self { probes }
    }

    /// Probe points in use
    pub const fn probes(&self) -> &ProbeSet {
        &self.probes
    }

    /// Whether any probe of `mover` lies inside `obstacle`'s interval
    pub fn intersects<A, B>(&self, mover: &A, obstacle: &B, mode: CollisionMode) -> bool
    where
        A: Transformable + ?Sized,
        B: Transformable + ?Sized,
    {
        let interval = WorldInterval::of(obstacle);
        self.probes
            .points()
            .iter()
            .any(|probe| interval.contains(&mover.transform_point(probe), mode))
    }

    /// Index of the first obstacle `mover` touches
    pub fn first_touching<'a, A, B, I>(&self, mover: &A, obstacles: I, mode: CollisionMode) -> Option<usize>
    where
        A: Transformable + ?Sized,
        B: Transformable + ?Sized + 'a,
        I: IntoIterator<Item = &'a B>,
    {
        obstacles
            .into_iter()
            .position(|obstacle| self.intersects(mover, obstacle, mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants::HALF_PI;
    use crate::foundation::math::{Space, Vec3};
    use crate::foundation::transform::ModelTransform;
    use approx::assert_relative_eq;

    fn boxed_at(x: f32, y: f32, z: f32) -> ModelTransform {
        ModelTransform::placed(Vec3::new(x, y, z), Vec3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_identical_boxes_intersect() {
        let oracle = CollisionOracle::default();
        let a = boxed_at(0.0, 0.0, 0.0);
        let b = boxed_at(0.0, 0.0, 0.0);

        assert!(oracle.intersects(&a, &b, CollisionMode::Solid));
        assert!(oracle.intersects(&a, &b, CollisionMode::Wall));

        let far = boxed_at(7.0, -3.0, 12.0);
        assert!(oracle.intersects(&far, &far, CollisionMode::Solid));
    }

    #[test]
    fn test_separated_boxes_never_intersect() {
        let oracle = CollisionOracle::default();
        let a = boxed_at(0.0, 0.0, 0.0);

        for gap in [2.01_f32, 3.0, 10.0] {
            for axis in Axis::ALL {
                for sign in [1.0_f32, -1.0] {
                    let offset = axis.vector(gap * sign);
                    let b = boxed_at(offset.x, offset.y, offset.z);

                    assert!(
                        !oracle.intersects(&a, &b, CollisionMode::Solid),
                        "gap {gap} along {axis:?} should not collide"
                    );
                    if axis != Axis::Y {
                        assert!(!oracle.intersects(&a, &b, CollisionMode::Wall));
                    }
                }
            }
        }
    }

    #[test]
    fn test_wall_mode_ignores_vertical_separation() {
        let oracle = CollisionOracle::default();
        let a = boxed_at(0.0, 0.0, 0.0);
        let above = boxed_at(0.0, 5.0, 0.0);

        assert!(oracle.intersects(&a, &above, CollisionMode::Wall));
        assert!(!oracle.intersects(&a, &above, CollisionMode::Solid));
    }

    #[test]
    fn test_probes_follow_mover_rotation() {
        let oracle = CollisionOracle::default();
        let obstacle = boxed_at(1.8, 0.0, 0.0);
        let mut mover = ModelTransform::new();

        assert!(!oracle.intersects(&mover, &obstacle, CollisionMode::Solid));

        mover.rotate(Axis::Y, HALF_PI, Space::Local);
        assert!(oracle.intersects(&mover, &obstacle, CollisionMode::Solid));
    }

    #[test]
    fn test_interval_is_order_independent() {
        let mut mirrored = boxed_at(3.0, 0.0, 0.0);
        mirrored.scale_x(-2.0);
        mirrored.scale_z(-1.0);

        let interval = WorldInterval::of(&mirrored);
        assert_relative_eq!(*interval.min(), Point3::new(1.0, -1.0, -1.0), epsilon = 1e-6);
        assert_relative_eq!(*interval.max(), Point3::new(5.0, 1.0, 1.0), epsilon = 1e-6);

        let mover = boxed_at(1.5, 0.0, -1.0);
        assert!(CollisionOracle::default().intersects(&mover, &mirrored, CollisionMode::Solid));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let interval = WorldInterval::of(&boxed_at(0.0, 0.0, 0.0));
        assert!(interval.contains(&Point3::new(1.0, -1.0, 1.0), CollisionMode::Solid));
        assert!(!interval.contains(&Point3::new(1.0001, 0.0, 0.0), CollisionMode::Solid));
        assert!(interval.contains(&Point3::new(0.0, 40.0, 0.0), CollisionMode::Wall));
    }

    #[test]
    fn test_custom_spread() {
        let narrow = CollisionOracle::new(ProbeSet::front(0.1));
        let wide = CollisionOracle::default();
        let mover = ModelTransform::new();
        let obstacle = boxed_at(1.5, 0.0, 0.0);

        assert!(wide.intersects(&mover, &obstacle, CollisionMode::Solid));
        assert!(!narrow.intersects(&mover, &obstacle, CollisionMode::Solid));
        assert_eq!(narrow.probes().points().len(), 3);
    }

    #[test]
    fn test_first_touching() {
        let oracle = CollisionOracle::default();
        let mover = ModelTransform::new();
        let obstacles = vec![boxed_at(5.0, 0.0, 0.0), boxed_at(0.0, 0.0, 1.5), boxed_at(0.0, 0.0, 0.5)];

        assert_eq!(oracle.first_touching(&mover, &obstacles, CollisionMode::Solid), Some(1));
        assert_eq!(oracle.first_touching(&mover, &obstacles[..1], CollisionMode::Solid), None);
    }
}
