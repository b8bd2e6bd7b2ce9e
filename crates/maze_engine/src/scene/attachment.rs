//! Rigid attachment of child objects to a parent
//!
//! Children do not inherit the parent's matrix. Instead every operation the
//! parent receives is replayed on each child so that the child ends up at
//! `parent * S(ratio) * T(socket + drift)`:
//!
//! - rotations are bracketed by pulling the children back onto the parent's
//!   origin first and pushing them out to their sockets afterwards, so they
//!   pivot around the parent's center instead of their own
//! - local translations are magnified by `1 / ratio` because the children's
//!   own axes are shrunk by `ratio`
//! - global translations are replayed unchanged, world units are world units
//!
//! Nudges move the sockets themselves and are remembered in the drift
//! accumulator so that the bracket keeps returning children to the right spot.

use crate::foundation::math::{Axis, Space, Vec3};
use crate::foundation::transform::Transformable;

#[derive(Debug, Clone)]
struct Attached<T> {
    object: T,
    socket: Vec3,
}

/// Children rigidly following a parent through mirrored operations
#[derive(Debug, Clone)]
pub struct RigidAttachment<T> {
    children: Vec<Attached<T>>,
    ratio: f32,
    drift: Vec3,
    seated: bool,
}

impl<T: Transformable> RigidAttachment<T> {
    /// Attach `children` to a parent sitting at the world origin with an
    /// identity matrix
    ///
    /// Each child is given as the object plus its socket offset, expressed in
    /// child units (so the world distance from the parent's center is
    /// `ratio * socket`). Children are shrunk by `ratio` and seated.
    ///
    /// # Panics
    ///
    /// When `ratio` is not a positive finite number.
    pub fn new(children: Vec<(T, Vec3)>, ratio: f32) -> Self {
        assert!(ratio.is_finite() && ratio > 0.0, "attachment ratio must be positive, got {ratio}");

        let children = children
            .into_iter()
            .map(|(mut object, socket)| {
                object.scale_uniform(ratio);
                Attached { object, socket }
            })
            .collect();

        let mut attachment = Self {
            children,
            ratio,
            drift: Vec3::zeros(),
            seated: false,
        };
        attachment.toggle_seating();
        attachment
    }

    /// Replay a parent rotation on every child, pivoting at the parent's center
    pub fn mirror_rotation(&mut self, axis: Axis, angle: f32, space: Space) {
        debug_assert!(self.seated);
        self.toggle_seating();
        for child in &mut self.children {
            child.object.rotate(axis, angle, space);
        }
        self.toggle_seating();
    }

    /// Replay a parent translation on every child
    pub fn mirror_translation(&mut self, axis: Axis, amount: f32, space: Space) {
        let amount = match space {
            Space::Local => amount / self.ratio,
            Space::Global => amount,
        };
        for child in &mut self.children {
            child.object.translate(axis, amount, space);
        }
    }

    /// Shift every socket by `offset` (child units) and move the children with it
    pub fn nudge(&mut self, offset: Vec3) {
        for child in &mut self.children {
            child.object.translate_by(offset, Space::Local);
        }
        self.drift += offset;
    }

    /// Attached children in insertion order
    pub fn children(&self) -> impl Iterator<Item = &T> + '_ {
        self.children.iter().map(|child| &child.object)
    }

    /// Child-to-parent size ratio
    pub const fn ratio(&self) -> f32 {
        self.ratio
    }

    /// Accumulated socket drift from nudges
    pub const fn drift(&self) -> Vec3 {
        self.drift
    }

    /// Current offset of child `index` from the parent's center, in child units
    pub fn seat_offset(&self, index: usize) -> Option<Vec3> {
        self.children.get(index).map(|child| child.socket + self.drift)
    }

    fn toggle_seating(&mut self) {
        let sign = if self.seated { -1.0 } else { 1.0 };
        for child in &mut self.children {
            child.object.translate_by((child.socket + self.drift) * sign, Space::Local);
        }
        self.seated = !self.seated;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants::{HALF_PI, PI};
    use crate::foundation::math::{Mat4, Point3};
    use crate::foundation::transform::ModelTransform;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-4;

    fn left_socket() -> Vec3 {
        Vec3::new(-1.5, 2.5, 3.3)
    }

    fn eyes() -> RigidAttachment<ModelTransform> {
        RigidAttachment::new(
            vec![
                (ModelTransform::new(), left_socket()),
                (ModelTransform::new(), Vec3::new(1.5, 2.5, 3.3)),
            ],
            0.2,
        )
    }

    fn expected_child(parent: &ModelTransform, attachment: &RigidAttachment<ModelTransform>, index: usize) -> Mat4 {
        let offset = attachment.seat_offset(index).expect("child exists");
        parent.model_matrix()
            * Mat4::new_scaling(attachment.ratio())
            * Mat4::new_translation(&offset)
    }

    fn assert_tracks(parent: &ModelTransform, attachment: &RigidAttachment<ModelTransform>) {
        for (index, child) in attachment.children().enumerate() {
            assert_relative_eq!(
                *child.model_matrix(),
                expected_child(parent, attachment, index),
                epsilon = EPSILON
            );
        }
    }

    #[test]
    fn test_children_seated_at_sockets() {
        let attachment = eyes();
        let origins: Vec<Point3> = attachment.children().map(Transformable::world_origin).collect();

        assert_relative_eq!(origins[0], Point3::new(-0.3, 0.5, 0.66), epsilon = EPSILON);
        assert_relative_eq!(origins[1], Point3::new(0.3, 0.5, 0.66), epsilon = EPSILON);
    }

    #[test]
    fn test_local_rotation_pivots_on_parent_center() {
        let mut parent = ModelTransform::new();
        let mut attachment = eyes();

        parent.translate(Axis::X, 2.0, Space::Local);
        attachment.mirror_translation(Axis::X, 2.0, Space::Local);
        parent.rotate(Axis::Y, HALF_PI, Space::Local);
        attachment.mirror_rotation(Axis::Y, HALF_PI, Space::Local);

        // socket (0.3, 0.5, 0.66) turned a quarter about Y is (0.66, 0.5, -0.3)
        let right = attachment.children().nth(1).expect("right child").world_origin();
        assert_relative_eq!(right, Point3::new(2.66, 0.5, -0.3), epsilon = EPSILON);
        assert_tracks(&parent, &attachment);
    }

    #[test]
    fn test_mixed_operations_keep_children_rigid() {
        let mut parent = ModelTransform::new();
        let mut attachment = eyes();

        let steps: [(Axis, f32, Space, bool); 7] = [
            (Axis::Z, 0.1, Space::Local, false),
            (Axis::Y, PI, Space::Local, true),
            (Axis::Y, 0.4, Space::Local, false),
            (Axis::X, -3.0, Space::Global, false),
            (Axis::Y, -HALF_PI, Space::Global, true),
            (Axis::Z, 1.7, Space::Local, false),
            (Axis::X, 0.3, Space::Local, true),
        ];
        for (axis, value, space, is_rotation) in steps {
            if is_rotation {
                parent.rotate(axis, value, space);
                attachment.mirror_rotation(axis, value, space);
            } else {
                parent.translate(axis, value, space);
                attachment.mirror_translation(axis, value, space);
            }
            assert_tracks(&parent, &attachment);
        }
    }

    #[test]
    fn test_nudge_accumulates_drift() {
        let mut parent = ModelTransform::new();
        let mut attachment = eyes();

        attachment.nudge(Vec3::new(0.0, 0.1, -0.08));
        attachment.nudge(Vec3::new(0.0, 0.1, -0.08));
        assert_relative_eq!(attachment.drift(), Vec3::new(0.0, 0.2, -0.16), epsilon = 1e-6);

        parent.rotate(Axis::Y, 1.0, Space::Local);
        attachment.mirror_rotation(Axis::Y, 1.0, Space::Local);
        assert_tracks(&parent, &attachment);

        attachment.nudge(Vec3::new(0.0, -0.2, 0.16));
        assert_relative_eq!(attachment.drift(), Vec3::zeros(), epsilon = 1e-6);
        assert_tracks(&parent, &attachment);
    }

    #[test]
    #[should_panic(expected = "ratio must be positive")]
    fn test_zero_ratio_is_a_fault() {
        let _ = RigidAttachment::new(vec![(ModelTransform::new(), left_socket())], 0.0);
    }
}
