use rustc_hash::FxHashMap;

use super::KeyAction;

/// Turns a per-frame "is held" level into a fire-once press-edge.
///
/// One "was held last frame" flag is kept per action; an edge fires only on
/// the released-to-held transition and the flag resets on release.
#[derive(Debug, Default)]
pub struct EdgeTracker {
    was_held: FxHashMap<KeyAction, bool>,
}

impl EdgeTracker {
    /// Create a tracker with every action released.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record this frame's level for `action`. Returns `true` exactly once
    /// per press.
    pub fn update(&mut self, action: KeyAction, held: bool) -> bool {
        let was_held = self.was_held.insert(action, held).unwrap_or(false);
        held && !was_held
    }

    /// Forget all held state, as if every key had been released.
    pub fn reset(&mut self) {
        self.was_held.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holding_fires_once() {
        let mut edges = EdgeTracker::new();
        let fired = (0..30)
            .filter(|_| edges.update(KeyAction::ToggleFog, true))
            .count();
        assert_eq!(fired, 1);
    }

    #[test]
    fn release_rearms() {
        let mut edges = EdgeTracker::new();
        assert!(edges.update(KeyAction::ToggleBlinn, true));
        assert!(!edges.update(KeyAction::ToggleBlinn, true));
        assert!(!edges.update(KeyAction::ToggleBlinn, false));
        assert!(edges.update(KeyAction::ToggleBlinn, true));
    }

    #[test]
    fn actions_are_tracked_independently() {
        let mut edges = EdgeTracker::new();
        assert!(edges.update(KeyAction::ToggleSkybox, true));
        assert!(edges.update(KeyAction::ToggleLighting, true));
        assert!(!edges.update(KeyAction::ToggleSkybox, true));
    }

    #[test]
    fn reset_allows_new_edge() {
        let mut edges = EdgeTracker::new();
        assert!(edges.update(KeyAction::ToggleParallax, true));
        edges.reset();
        assert!(edges.update(KeyAction::ToggleParallax, true));
    }
}
