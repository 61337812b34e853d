use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Point light and background parameters.
pub struct LightingOptions {
    /// World-space light position (also where the marker cube is drawn).
    pub light_position: [f32; 3],
    /// Light color.
    pub light_color: [f32; 3],
    /// Ambient term applied to lit surfaces.
    pub ambient: f32,
    /// Background clear color.
    pub clear_color: [f32; 3],
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            light_position: [0.0, 10.0, 0.0],
            light_color: [1.0, 1.0, 1.0],
            ambient: 0.15,
            clear_color: [0.1, 0.1, 0.1],
        }
    }
}
