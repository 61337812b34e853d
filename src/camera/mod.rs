//! Camera system for first-person scene viewing.
//!
//! Provides a yaw/pitch orientation model whose front, right and up vectors
//! are always derived from the two angles, plus the view and projection
//! transforms built from it.

/// Core camera struct, movement directions and default constants.
pub mod core;

pub use self::core::{Camera, CameraMovement};
