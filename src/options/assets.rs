use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Where image assets are read from.
pub struct AssetOptions {
    /// Directory holding the texture files named by the scene table.
    pub texture_dir: PathBuf,
}

impl Default for AssetOptions {
    fn default() -> Self {
        Self {
            texture_dir: PathBuf::from("assets/textures"),
        }
    }
}

impl AssetOptions {
    /// Resolve a scene texture file name against the texture directory.
    #[must_use]
    pub fn texture_path(&self, file_name: &str) -> PathBuf {
        self.texture_dir.join(file_name)
    }
}
