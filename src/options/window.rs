use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Initial window parameters.
pub struct WindowOptions {
    /// Inner width in logical pixels.
    pub width: u32,
    /// Inner height in logical pixels.
    pub height: u32,
    /// Window title.
    pub title: String,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "Shadelab".into(),
        }
    }
}
