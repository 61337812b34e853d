//! Toggleable rendering modes.
//!
//! Every mode is an independent flag flipped by a key press-edge. The only
//! cross-flag rule lives in [`RenderModes::toggle_fog`]: fog cannot be
//! toggled while the skybox is shown, since the two are never composited
//! together.

use serde::{Deserialize, Serialize};

use crate::input::KeyAction;

/// The set of rendering modes for the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderModes {
    /// Draw the cube-mapped background.
    pub skybox: bool,
    /// Per-fragment lighting (and the light marker cube).
    pub lighting: bool,
    /// Blinn-Phong specular when set, Phong otherwise.
    pub blinn: bool,
    /// Exponential distance fog.
    pub fog: bool,
    /// Grayscale post-processing pass.
    pub monochrome: bool,
    /// Parallax mapping on the wall instead of plain normal mapping.
    pub parallax: bool,
}

impl Default for RenderModes {
    fn default() -> Self {
        Self {
            skybox: false,
            lighting: true,
            blinn: true,
            fog: false,
            monochrome: false,
            parallax: false,
        }
    }
}

impl RenderModes {
    /// Flip skybox rendering.
    pub fn toggle_skybox(&mut self) {
        self.skybox = !self.skybox;
    }

    /// Flip lighting.
    pub fn toggle_lighting(&mut self) {
        self.lighting = !self.lighting;
    }

    /// Switch between Blinn-Phong and Phong specular.
    pub fn toggle_blinn(&mut self) {
        self.blinn = !self.blinn;
    }

    /// Flip fog, unless the skybox is active. Returns whether fog changed.
    pub fn toggle_fog(&mut self) -> bool {
        if self.skybox {
            return false;
        }
        self.fog = !self.fog;
        true
    }

    /// Flip the monochrome post-process.
    pub fn toggle_monochrome(&mut self) {
        self.monochrome = !self.monochrome;
    }

    /// Switch between parallax and simple normal mapping.
    pub fn toggle_parallax(&mut self) {
        self.parallax = !self.parallax;
    }

    /// Apply a toggle action. Returns `true` if a mode changed; movement and
    /// exit actions are not modes and return `false`.
    pub fn apply(&mut self, action: KeyAction) -> bool {
        match action {
            KeyAction::ToggleSkybox => self.toggle_skybox(),
            KeyAction::ToggleLighting => self.toggle_lighting(),
            KeyAction::ToggleBlinn => self.toggle_blinn(),
            KeyAction::ToggleFog => return self.toggle_fog(),
            KeyAction::ToggleMonochrome => self.toggle_monochrome(),
            KeyAction::ToggleParallax => self.toggle_parallax(),
            KeyAction::MoveForward
            | KeyAction::MoveBackward
            | KeyAction::MoveLeft
            | KeyAction::MoveRight
            | KeyAction::Exit => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_defaults() {
        let modes = RenderModes::default();
        assert!(modes.lighting);
        assert!(modes.blinn);
        assert!(!modes.skybox);
        assert!(!modes.fog);
        assert!(!modes.monochrome);
        assert!(!modes.parallax);
    }

    #[test]
    fn each_toggle_flips_only_its_flag() {
        let cases = [
            (KeyAction::ToggleSkybox, RenderModes { skybox: true, ..Default::default() }),
            (KeyAction::ToggleLighting, RenderModes { lighting: false, ..Default::default() }),
            (KeyAction::ToggleBlinn, RenderModes { blinn: false, ..Default::default() }),
            (KeyAction::ToggleFog, RenderModes { fog: true, ..Default::default() }),
            (
                KeyAction::ToggleMonochrome,
                RenderModes { monochrome: true, ..Default::default() },
            ),
            (KeyAction::ToggleParallax, RenderModes { parallax: true, ..Default::default() }),
        ];
        for (action, expected) in cases {
            let mut modes = RenderModes::default();
            assert!(modes.apply(action), "{action:?} should change state");
            assert_eq!(modes, expected, "{action:?}");
        }
    }

    #[test]
    fn fog_is_locked_while_skybox_active() {
        let mut modes = RenderModes {
            skybox: true,
            ..Default::default()
        };
        assert!(!modes.toggle_fog());
        assert!(!modes.fog);

        modes.toggle_skybox();
        assert!(modes.toggle_fog());
        assert!(modes.fog);
    }

    #[test]
    fn enabling_skybox_keeps_existing_fog() {
        let mut modes = RenderModes::default();
        assert!(modes.toggle_fog());
        modes.toggle_skybox();
        assert!(modes.fog);
        assert!(!modes.apply(KeyAction::ToggleFog));
        assert!(modes.fog);
    }

    #[test]
    fn non_toggle_actions_are_ignored() {
        let mut modes = RenderModes::default();
        assert!(!modes.apply(KeyAction::MoveForward));
        assert!(!modes.apply(KeyAction::Exit));
        assert_eq!(modes, RenderModes::default());
    }
}
