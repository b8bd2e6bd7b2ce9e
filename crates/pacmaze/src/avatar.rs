//! The player avatar
//!
//! A yellow sphere with a wedge mouth and two eyes. Each tick the mouth opens
//! or closes a little (regenerating the body mesh), the avatar steps forward
//! unless a wall blocks it, and an ongoing jump advances one step.

use maze_engine::foundation::math::{Axis, Mat4, Space, Vec3};
use maze_engine::foundation::transform::Transformable;
use maze_engine::render::{Drawable, Material, SphereMesh, SphereParams, SphereRenderable};
use maze_engine::scene::RigidAttachment;

use crate::config::AvatarConfig;
use crate::facing::FacingDirection;

/// Vertical phase of the avatar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalMotion {
    /// On the floor
    #[default]
    Grounded,
    /// Rising towards the jump ceiling
    JumpingUp,
    /// Coming back down
    FallingDown,
}

/// Animation and motion state, advanced once per tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AvatarState {
    /// Current mouth opening, between zero and the configured maximum
    pub mouth_open: f32,
    /// Whether the mouth is currently closing
    pub mouth_closing: bool,
    /// Height above the floor
    pub jump_height: f32,
    /// Vertical phase
    pub vertical: VerticalMotion,
    /// Direction of travel
    pub facing: FacingDirection,
}

impl AvatarState {
    /// Rising
    pub fn is_jumping_up(&self) -> bool {
        self.vertical == VerticalMotion::JumpingUp
    }

    /// Falling
    pub fn is_falling_down(&self) -> bool {
        self.vertical == VerticalMotion::FallingDown
    }

    /// On the floor
    pub fn is_grounded(&self) -> bool {
        self.vertical == VerticalMotion::Grounded
    }
}

/// Player avatar: body sphere plus rigidly attached eyes
#[derive(Debug, Clone)]
pub struct Avatar {
    body: SphereRenderable,
    eyes: RigidAttachment<SphereRenderable>,
    state: AvatarState,
    config: AvatarConfig,
}

impl Avatar {
    /// Build the avatar at the world origin, facing world +Z
    pub fn new(config: &AvatarConfig) -> Self {
        let body_params = SphereParams {
            latitude_bands: config.latitude_bands,
            longitude_bands: config.longitude_bands,
            radius: config.radius,
            mouth_open: 0.0,
        };
        let eye_params = SphereParams {
            radius: 1.0,
            ..body_params
        };

        let eyes = config
            .eye_sockets
            .iter()
            .map(|&socket| {
                (
                    SphereRenderable::new(SphereMesh(eye_params), Material::eye()),
                    Vec3::from(socket),
                )
            })
            .collect();

        log::debug!(
            "Avatar created: radius {}, {}x{} bands",
            config.radius,
            config.latitude_bands,
            config.longitude_bands
        );

        Self {
            body: SphereRenderable::new(SphereMesh(body_params), Material::avatar()),
            eyes: RigidAttachment::new(eyes, config.eye_ratio),
            state: AvatarState::default(),
            config: config.clone(),
        }
    }

    /// Advance one simulation step
    ///
    /// `blocked` is the wall test for the current frame; a blocked avatar
    /// keeps animating and jumping but does not step forward.
    pub fn tick(&mut self, blocked: bool) {
        self.animate_mouth();
        if !blocked {
            self.translate(Axis::Z, self.config.move_step, Space::Local);
        }
        self.advance_jump();
    }

    /// Start a jump; ignored while already airborne
    pub fn jump(&mut self) {
        if self.state.is_grounded() {
            log::debug!("Jump");
            self.state.vertical = VerticalMotion::JumpingUp;
        }
    }

    /// Turn to `target` by the shortest rotation about the avatar's own center
    pub fn turn_to(&mut self, target: FacingDirection) {
        let angle = self.state.facing.turn_angle(target);
        if angle != 0.0 {
            log::debug!("Turning {:?} -> {target:?} ({angle:.3} rad)", self.state.facing);
            self.rotate(Axis::Y, angle, Space::Local);
        }
        self.state.facing = target;
    }

    /// Face world -X
    pub fn turn_left(&mut self) {
        self.turn_to(FacingDirection::Left);
    }

    /// Face world +X
    pub fn turn_right(&mut self) {
        self.turn_to(FacingDirection::Right);
    }

    /// Face away from the camera
    pub fn turn_forward(&mut self) {
        self.turn_to(FacingDirection::Forward);
    }

    /// Face the camera
    pub fn turn_backward(&mut self) {
        self.turn_to(FacingDirection::Backward);
    }

    /// Current state
    pub const fn state(&self) -> &AvatarState {
        &self.state
    }

    /// Body renderable
    pub const fn body(&self) -> &SphereRenderable {
        &self.body
    }

    /// Attached eyes
    pub const fn eyes(&self) -> &RigidAttachment<SphereRenderable> {
        &self.eyes
    }

    /// Body first, then the eyes
    pub fn drawables(&self) -> Vec<&dyn Drawable> {
        std::iter::once(&self.body as &dyn Drawable)
            .chain(self.eyes.children().map(|eye| eye as &dyn Drawable))
            .collect()
    }

    fn animate_mouth(&mut self) {
        let step = self.config.mouth_step;
        let max = self.config.mouth_max;
        let tolerance = step * 1e-3;
        let previous = self.state.mouth_open;

        if self.state.mouth_closing {
            self.state.mouth_open -= step;
            if self.state.mouth_open <= tolerance {
                self.state.mouth_open = 0.0;
                self.state.mouth_closing = false;
            }
        } else {
            self.state.mouth_open += step;
            if self.state.mouth_open >= max - tolerance {
                self.state.mouth_open = max;
                self.state.mouth_closing = true;
            }
        }

        let params = self.body.generator().0.with_mouth(self.state.mouth_open);
        self.body.regenerate_with(SphereMesh(params));

        // eyes ride up and back while the mouth opens
        let delta = self.state.mouth_open - previous;
        self.eyes.nudge(self.config.eye_nudge() * (delta / step));
    }

    fn advance_jump(&mut self) {
        let step = self.config.jump_step;
        let ceiling = self.config.jump_ceiling;
        let tolerance = step * 1e-3;
        let previous = self.state.jump_height;

        match self.state.vertical {
            VerticalMotion::Grounded => return,
            VerticalMotion::JumpingUp => {
                self.state.jump_height += step;
                if self.state.jump_height >= ceiling - tolerance {
                    self.state.jump_height = ceiling;
                    self.state.vertical = VerticalMotion::FallingDown;
                }
            }
            VerticalMotion::FallingDown => {
                self.state.jump_height -= step;
                if self.state.jump_height <= tolerance {
                    self.state.jump_height = 0.0;
                    self.state.vertical = VerticalMotion::Grounded;
                }
            }
        }

        self.translate(Axis::Y, self.state.jump_height - previous, Space::Global);
    }
}

impl Transformable for Avatar {
    fn model_matrix(&self) -> &Mat4 {
        self.body.model_matrix()
    }

    fn rotate(&mut self, axis: Axis, angle: f32, space: Space) {
        self.body.rotate(axis, angle, space);
        self.eyes.mirror_rotation(axis, angle, space);
    }

    fn translate(&mut self, axis: Axis, amount: f32, space: Space) {
        self.body.translate(axis, amount, space);
        self.eyes.mirror_translation(axis, amount, space);
    }

    /// Scales the body only; the eyes keep their size
    fn scale_axis(&mut self, axis: Axis, factor: f32) {
        self.body.scale_axis(axis, factor);
    }
}
