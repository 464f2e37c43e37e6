//! Keyboard and touch input mapping
//!
//! Keyboard and touch are tracked separately so lifting a finger doesn't
//! release a key that is still held (and vice versa).

use crate::sim::TickInput;

/// A logical control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Left,
    Right,
    Jump,
}

impl Control {
    /// Map a `KeyboardEvent.key` value; unknown keys are ignored
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Control::Left),
            "ArrowRight" | "d" | "D" => Some(Control::Right),
            " " | "ArrowUp" | "w" | "W" => Some(Control::Jump),
            _ => None,
        }
    }
}

/// Where a key event was aimed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFocus {
    /// The page or canvas
    Game,
    /// An editable field such as the name entry box
    TextField,
}

/// Currently held controls across keyboard and touch
#[derive(Debug, Clone, Default)]
pub struct Controls {
    keys: TickInput,
    touch: TickInput,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key down/up. Returns true if the key is one of ours.
    pub fn key(&mut self, key: &str, pressed: bool) -> bool {
        let Some(control) = Control::from_key(key) else {
            return false;
        };
        match control {
            Control::Left => self.keys.left = pressed,
            Control::Right => self.keys.right = pressed,
            Control::Jump => self.keys.jump = pressed,
        }
        true
    }

    /// Route a browser key event. Presses are only taken while a round is
    /// being played and no text field has focus; releases always let go of
    /// the control so nothing stays held. Returns true when the game
    /// consumed the key and its default action should be suppressed.
    pub fn key_event(&mut self, key: &str, pressed: bool, focus: KeyFocus, playing: bool) -> bool {
        let capture = playing && focus == KeyFocus::Game;
        if pressed && !capture {
            return false;
        }
        self.key(key, pressed) && capture
    }

    /// Touch down/move at `x` on a field `field_width` wide: the left half
    /// steers left, the right half steers right, and any touch holds jump
    pub fn touch(&mut self, x: f32, field_width: f32) {
        let left = x < field_width / 2.0;
        self.touch = TickInput {
            left,
            right: !left,
            jump: true,
        };
    }

    /// All touches lifted
    pub fn touch_end(&mut self) {
        self.touch = TickInput::default();
    }

    /// Drop everything held (e.g. on round start)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Combined input for this frame
    pub fn snapshot(&self) -> TickInput {
        TickInput {
            left: self.keys.left || self.touch.left,
            right: self.keys.right || self.touch.right,
            jump: self.keys.jump || self.touch.jump,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(Control::from_key("ArrowLeft"), Some(Control::Left));
        assert_eq!(Control::from_key("ArrowRight"), Some(Control::Right));
        assert_eq!(Control::from_key(" "), Some(Control::Jump));
        assert_eq!(Control::from_key("Escape"), None);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let mut controls = Controls::new();
        assert!(!controls.key("q", true));
        assert_eq!(controls.snapshot(), TickInput::default());
    }

    #[test]
    fn test_key_press_and_release() {
        let mut controls = Controls::new();
        controls.key("ArrowLeft", true);
        controls.key(" ", true);
        let input = controls.snapshot();
        assert!(input.left && input.jump && !input.right);

        controls.key("ArrowLeft", false);
        assert!(!controls.snapshot().left);
        assert!(controls.snapshot().jump);
    }

    #[test]
    fn test_typing_a_name_is_not_captured() {
        let mut controls = Controls::new();
        for key in ["A", "n", "n", " ", "w", "d", "a"] {
            assert!(!controls.key_event(key, true, KeyFocus::TextField, false));
            assert!(!controls.key_event(key, true, KeyFocus::TextField, true));
        }
        assert_eq!(controls.snapshot(), TickInput::default());
    }

    #[test]
    fn test_keys_only_captured_while_playing() {
        let mut controls = Controls::new();
        assert!(!controls.key_event(" ", true, KeyFocus::Game, false));
        assert!(!controls.snapshot().jump);

        assert!(controls.key_event(" ", true, KeyFocus::Game, true));
        assert!(controls.key_event("a", true, KeyFocus::Game, true));
        assert!(!controls.key_event("q", true, KeyFocus::Game, true));
        let input = controls.snapshot();
        assert!(input.jump && input.left);
    }

    #[test]
    fn test_release_always_lets_go() {
        let mut controls = Controls::new();
        controls.key_event("ArrowRight", true, KeyFocus::Game, true);
        // Round ended and focus moved to the name box before the key came up
        assert!(!controls.key_event("ArrowRight", false, KeyFocus::TextField, false));
        assert!(!controls.snapshot().right);
    }

    #[test]
    fn test_touch_halves() {
        let mut controls = Controls::new();
        controls.touch(50.0, 400.0);
        let input = controls.snapshot();
        assert!(input.left && !input.right && input.jump);

        controls.touch(300.0, 400.0);
        let input = controls.snapshot();
        assert!(!input.left && input.right && input.jump);

        controls.touch_end();
        assert_eq!(controls.snapshot(), TickInput::default());
    }

    #[test]
    fn test_touch_end_keeps_keys() {
        let mut controls = Controls::new();
        controls.key("ArrowRight", true);
        controls.touch(10.0, 400.0);
        controls.touch_end();
        assert!(controls.snapshot().right);
    }
}
