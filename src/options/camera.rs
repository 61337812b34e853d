use serde::{Deserialize, Serialize};

use crate::camera::core::{
    DEFAULT_PITCH, DEFAULT_SENSITIVITY, DEFAULT_SPEED, DEFAULT_YAW, DEFAULT_ZOOM,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Camera start state, projection and control parameters.
pub struct CameraOptions {
    /// Initial eye position.
    pub position: [f32; 3],
    /// Initial yaw in degrees.
    pub yaw: f32,
    /// Initial pitch in degrees.
    pub pitch: f32,
    /// Movement speed in world units per second.
    pub speed: f32,
    /// Mouse sensitivity in degrees per unit of motion.
    pub sensitivity: f32,
    /// Initial vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    /// Upper bound on a single frame's elapsed time in seconds. Unset by
    /// default, so a stall (breakpoint, window drag) produces one large
    /// movement step.
    pub max_frame_delta: Option<f32>,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            position: [0.0, 12.0, -23.6],
            yaw: DEFAULT_YAW,
            pitch: DEFAULT_PITCH,
            speed: DEFAULT_SPEED,
            sensitivity: DEFAULT_SENSITIVITY,
            fovy: DEFAULT_ZOOM,
            znear: 0.1,
            zfar: 100.0,
            max_frame_delta: None,
        }
    }
}
