//! Converts raw key and mouse input into per-frame viewer input.
//!
//! The `InputProcessor` owns all transient input state (held keys, taps not
//! yet seen by a frame, press-edge flags, focus) and the key-binding map.
//! Keys are polled once per frame, the same way a polling window API
//! reports them, so toggles fire on press-edges only.

use rustc_hash::FxHashSet;

use super::edge::EdgeTracker;
use super::KeyAction;
use crate::camera::CameraMovement;
use crate::options::KeybindingOptions;

/// Everything the keyboard contributed to one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Movement directions held this frame.
    pub movements: Vec<CameraMovement>,
    /// Toggle actions whose press-edge fired this frame.
    pub toggles: Vec<KeyAction>,
    /// Whether the exit action is held.
    pub exit: bool,
}

/// Tracks held keys and resolves them through the key bindings.
pub struct InputProcessor {
    key_bindings: KeybindingOptions,
    /// Actions whose key is currently down.
    held: FxHashSet<KeyAction>,
    /// Actions pressed since the last poll. A press and release between two
    /// frames still counts as held for exactly one poll.
    tapped: FxHashSet<KeyAction>,
    edges: EdgeTracker,
    focused: bool,
}

impl InputProcessor {
    /// Create a processor with the given key bindings.
    #[must_use]
    pub fn new(mut key_bindings: KeybindingOptions) -> Self {
        key_bindings.rebuild_reverse_map();
        Self {
            key_bindings,
            held: FxHashSet::default(),
            tapped: FxHashSet::default(),
            edges: EdgeTracker::new(),
            focused: true,
        }
    }

    /// Read-only access to the key bindings.
    #[must_use]
    pub fn key_bindings(&self) -> &KeybindingOptions {
        &self.key_bindings
    }

    /// Whether the window currently has focus.
    #[must_use]
    pub fn focused(&self) -> bool {
        self.focused
    }

    /// Record a key press or release. Returns the bound action, if any.
    pub fn handle_key(&mut self, key: &str, pressed: bool) -> Option<KeyAction> {
        let action = self.key_bindings.lookup(key)?;
        if pressed {
            let _ = self.held.insert(action);
            let _ = self.tapped.insert(action);
        } else {
            let _ = self.held.remove(&action);
        }
        Some(action)
    }

    /// Track focus. Losing focus releases every key, since the matching
    /// release events will never arrive.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if !focused {
            self.held.clear();
            self.tapped.clear();
            self.edges.reset();
        }
    }

    /// Convert relative mouse motion into a camera look delta.
    ///
    /// The vertical axis is inverted (moving the mouse up pitches up).
    /// Motion is ignored while unfocused.
    #[must_use]
    pub fn look_delta(&self, dx: f32, dy: f32) -> Option<(f32, f32)> {
        self.focused.then_some((dx, -dy))
    }

    /// Whether `action` counts as held for the current poll.
    #[must_use]
    pub fn is_held(&self, action: KeyAction) -> bool {
        self.held.contains(&action) || self.tapped.contains(&action)
    }

    /// Sample the keyboard for one frame: held movements, fired toggle
    /// edges, and the exit request. Clears pending taps.
    pub fn poll(&mut self) -> FrameInput {
        let movements = self.held_movements();
        let toggles = self.poll_toggles();
        let exit = self.is_held(KeyAction::Exit);
        self.tapped.clear();

        FrameInput {
            movements,
            toggles,
            exit,
        }
    }

    /// Movement directions currently held, in a fixed order.
    #[must_use]
    pub fn held_movements(&self) -> Vec<CameraMovement> {
        KeyAction::MOVEMENTS
            .into_iter()
            .filter(|action| self.is_held(*action))
            .filter_map(KeyAction::movement)
            .collect()
    }

    /// Advance the edge trackers and return the toggles whose press-edge
    /// fired. Does not clear pending taps; [`Self::poll`] does.
    pub fn poll_toggles(&mut self) -> Vec<KeyAction> {
        let mut toggles = Vec::new();
        for action in KeyAction::TOGGLES {
            let held = self.is_held(action);
            if self.edges.update(action, held) {
                toggles.push(action);
            }
        }
        toggles
    }
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new(KeybindingOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_toggle_fires_once_over_many_frames() {
        let mut input = InputProcessor::default();
        assert_eq!(input.handle_key("KeyM", true), Some(KeyAction::ToggleMonochrome));

        let fired: usize = (0..10).map(|_| input.poll().toggles.len()).sum();
        assert_eq!(fired, 1);

        let _ = input.handle_key("KeyM", false);
        assert!(input.poll().toggles.is_empty());
        let _ = input.handle_key("KeyM", true);
        assert_eq!(input.poll().toggles, vec![KeyAction::ToggleMonochrome]);
    }

    #[test]
    fn tap_between_frames_fires_once() {
        let mut input = InputProcessor::default();
        let _ = input.handle_key("KeyL", true);
        let _ = input.handle_key("KeyL", false);
        assert_eq!(input.poll().toggles, vec![KeyAction::ToggleLighting]);
        assert!(input.poll().toggles.is_empty());
    }

    #[test]
    fn movement_is_level_triggered() {
        let mut input = InputProcessor::default();
        let _ = input.handle_key("KeyW", true);
        let _ = input.handle_key("KeyD", true);
        for _ in 0..3 {
            assert_eq!(
                input.poll().movements,
                vec![CameraMovement::Forward, CameraMovement::Right]
            );
        }
        let _ = input.handle_key("KeyW", false);
        assert_eq!(input.poll().movements, vec![CameraMovement::Right]);
    }

    #[test]
    fn unbound_keys_are_ignored() {
        let mut input = InputProcessor::default();
        assert_eq!(input.handle_key("KeyQ", true), None);
        assert_eq!(input.poll(), FrameInput::default());
    }

    #[test]
    fn escape_requests_exit() {
        let mut input = InputProcessor::default();
        let _ = input.handle_key("Escape", true);
        assert!(input.poll().exit);
    }

    #[test]
    fn focus_loss_releases_keys() {
        let mut input = InputProcessor::default();
        let _ = input.handle_key("KeyA", true);
        input.set_focused(false);
        assert!(input.poll().movements.is_empty());
        assert_eq!(input.look_delta(3.0, 4.0), None);

        input.set_focused(true);
        assert_eq!(input.look_delta(3.0, 4.0), Some((3.0, -4.0)));
    }
}
