//! Player commands and their key bindings

use maze_engine::input::KeyCode;

use crate::avatar::Avatar;
use crate::facing::FacingDirection;

/// Everything the player can ask the avatar to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Face away from the camera
    TurnForward,
    /// Face the camera
    TurnBackward,
    /// Face left
    TurnLeft,
    /// Face right
    TurnRight,
    /// Start a jump
    Jump,
}

impl Command {
    /// Command bound to `key`, if any
    pub const fn from_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::ArrowUp => Some(Self::TurnForward),
            KeyCode::ArrowDown => Some(Self::TurnBackward),
            KeyCode::ArrowLeft => Some(Self::TurnLeft),
            KeyCode::ArrowRight => Some(Self::TurnRight),
            KeyCode::Space => Some(Self::Jump),
            KeyCode::Escape => None,
        }
    }

    /// Apply the command to the avatar right away
    pub fn apply(self, avatar: &mut Avatar) {
        match self {
            Self::TurnForward => avatar.turn_to(FacingDirection::Forward),
            Self::TurnBackward => avatar.turn_to(FacingDirection::Backward),
            Self::TurnLeft => avatar.turn_to(FacingDirection::Left),
            Self::TurnRight => avatar.turn_to(FacingDirection::Right),
            Self::Jump => avatar.jump(),
        }
    }
}
