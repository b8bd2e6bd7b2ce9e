//! Input sources
//!
//! The engine does not talk to a window system. Each frame it polls an
//! [`InputSource`] for the keys pressed since the last frame and forwards them
//! to the application as [`AppEvent::KeyPressed`](crate::application::AppEvent).

use serde::{Deserialize, Serialize};

/// Keys the engine knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    /// Up arrow
    ArrowUp,
    /// Down arrow
    ArrowDown,
    /// Left arrow
    ArrowLeft,
    /// Right arrow
    ArrowRight,
    /// Space bar
    Space,
    /// Escape
    Escape,
}

/// Something that can be asked for key presses once per frame
pub trait InputSource {
    /// Keys pressed since the previous poll; `frame` is the frame about to run
    fn poll(&mut self, frame: u64) -> Vec<KeyCode>;
}

/// Input source that never reports anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl InputSource for NoInput {
    fn poll(&mut self, _frame: u64) -> Vec<KeyCode> {
        Vec::new()
    }
}

/// One scripted key press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptedKey {
    /// Frame on which the key is delivered
    pub frame: u64,
    /// Key pressed
    pub key: KeyCode,
}

/// Replays a fixed list of key presses, used for headless runs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptedInput {
    /// Presses in delivery order
    pub events: Vec<ScriptedKey>,
}

impl ScriptedInput {
    /// Create a script from presses in any order
    pub fn new(mut events: Vec<ScriptedKey>) -> Self {
        events.sort_by_key(|event| event.frame);
        Self { events }
    }

    /// Add a press
    #[must_use]
    pub fn press(mut self, frame: u64, key: KeyCode) -> Self {
        self.events.push(ScriptedKey { frame, key });
        self.events.sort_by_key(|event| event.frame);
        self
    }

    /// Whether the script has no presses at all
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, frame: u64) -> Vec<KeyCode> {
        self.events
            .iter()
            .filter(|event| event.frame == frame)
            .map(|event| event.key)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_input_delivers_on_frame() {
        let mut input = ScriptedInput::default()
            .press(5, KeyCode::Space)
            .press(2, KeyCode::ArrowLeft)
            .press(5, KeyCode::ArrowUp);

        assert_eq!(input.events[0].frame, 2, "script is kept in frame order");
        assert!(input.poll(0).is_empty());
        assert_eq!(input.poll(2), vec![KeyCode::ArrowLeft]);
        assert_eq!(input.poll(5), vec![KeyCode::Space, KeyCode::ArrowUp]);
    }

    #[test]
    fn test_no_input() {
        assert!(NoInput.poll(42).is_empty());
        assert!(ScriptedInput::new(Vec::new()).is_empty());
    }
}
