use serde::{Deserialize, Serialize};

/// Exponential distance fog: `visibility = exp(-(distance * density)^gradient)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FogOptions {
    /// How quickly visibility falls off with distance.
    pub density: f32,
    /// Shape exponent of the falloff curve.
    pub gradient: f32,
    /// Color surfaces fade toward.
    pub color: [f32; 3],
}

impl Default for FogOptions {
    fn default() -> Self {
        Self {
            density: 0.1,
            gradient: 0.9,
            color: [0.1, 0.1, 0.1],
        }
    }
}
