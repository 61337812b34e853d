use serde::{Deserialize, Serialize};

use crate::camera::CameraMovement;

/// Viewer-level actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML files stay readable:
/// ```toml
/// [keybindings.bindings]
/// toggle_skybox = "KeyZ"
/// move_forward = "KeyW"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Move along the camera's front vector while held.
    MoveForward,
    /// Move against the camera's front vector while held.
    MoveBackward,
    /// Strafe left while held.
    MoveLeft,
    /// Strafe right while held.
    MoveRight,
    /// Show or hide the skybox.
    ToggleSkybox,
    /// Enable or disable lighting.
    ToggleLighting,
    /// Switch between Blinn-Phong and Phong.
    ToggleBlinn,
    /// Enable or disable fog (ignored while the skybox is shown).
    ToggleFog,
    /// Enable or disable the monochrome post-process.
    ToggleMonochrome,
    /// Switch between parallax and simple normal mapping.
    ToggleParallax,
    /// Close the viewer.
    Exit,
}

impl KeyAction {
    /// Continuous (level-triggered) movement actions.
    pub const MOVEMENTS: [Self; 4] = [
        Self::MoveForward,
        Self::MoveBackward,
        Self::MoveLeft,
        Self::MoveRight,
    ];

    /// Edge-triggered mode toggles.
    pub const TOGGLES: [Self; 6] = [
        Self::ToggleSkybox,
        Self::ToggleLighting,
        Self::ToggleBlinn,
        Self::ToggleFog,
        Self::ToggleMonochrome,
        Self::ToggleParallax,
    ];

    /// The camera movement this action drives, if any.
    #[must_use]
    pub fn movement(self) -> Option<CameraMovement> {
        match self {
            Self::MoveForward => Some(CameraMovement::Forward),
            Self::MoveBackward => Some(CameraMovement::Backward),
            Self::MoveLeft => Some(CameraMovement::Left),
            Self::MoveRight => Some(CameraMovement::Right),
            _ => None,
        }
    }

    /// Whether this action is an edge-triggered mode toggle.
    #[must_use]
    pub fn is_toggle(self) -> bool {
        Self::TOGGLES.contains(&self)
    }
}
