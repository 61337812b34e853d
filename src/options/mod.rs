//! Centralized viewer options with TOML file support.
//!
//! All tweakable settings (window, camera, lighting, fog, initial render
//! modes, asset location, keybindings) are consolidated here. Options
//! serialize to/from TOML; the binary reads `shadelab.toml` from the working
//! directory when it exists.

mod assets;
mod camera;
mod fog;
mod keybindings;
mod lighting;
mod window;

use std::path::Path;

pub use assets::AssetOptions;
pub use camera::CameraOptions;
pub use fog::FogOptions;
pub use keybindings::KeybindingOptions;
pub use lighting::LightingOptions;
use serde::{Deserialize, Serialize};
pub use window::WindowOptions;

use crate::error::ViewerError;
use crate::modes::RenderModes;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[fog]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Initial window size and title.
    pub window: WindowOptions,
    /// Camera start state, projection and control parameters.
    pub camera: CameraOptions,
    /// Light and background parameters.
    pub lighting: LightingOptions,
    /// Distance fog parameters.
    pub fog: FogOptions,
    /// Render modes active at startup.
    pub modes: RenderModes,
    /// Asset directory locations.
    pub assets: AssetOptions,
    /// Keyboard binding options.
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, ViewerError> {
        let content = std::fs::read_to_string(path).map_err(ViewerError::Io)?;
        let mut options: Self = toml::from_str(&content)
            .map_err(|e| ViewerError::OptionsParse(e.to_string()))?;
        options.keybindings.rebuild_reverse_map();
        Ok(options)
    }

    /// Load options from `path` if it exists, falling back to defaults.
    ///
    /// A file that exists but fails to parse is reported and ignored.
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::debug!("no options file at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(options) => {
                log::info!("loaded options from {}", path.display());
                options
            }
            Err(e) => {
                log::error!("ignoring {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), ViewerError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ViewerError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ViewerError::Io)?;
        }
        std::fs::write(path, content).map_err(ViewerError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyAction;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[fog]
density = 0.25

[modes]
skybox = true
";
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.fog.density, 0.25);
        assert_eq!(opts.fog.gradient, 0.9);
        assert!(opts.modes.skybox);
        assert!(opts.modes.lighting);
        assert_eq!(opts.camera.zfar, 100.0);
        assert_eq!(opts.camera.max_frame_delta, None);
        assert_eq!(opts.window.width, 800);
    }

    #[test]
    fn keybinding_lookup() {
        let opts = Options::default();
        assert_eq!(
            opts.keybindings.lookup("KeyZ"),
            Some(KeyAction::ToggleSkybox)
        );
        assert_eq!(opts.keybindings.lookup("KeyW"), Some(KeyAction::MoveForward));
        assert_eq!(opts.keybindings.lookup("Escape"), Some(KeyAction::Exit));
        assert_eq!(opts.keybindings.lookup("KeyQ"), None);
        assert_eq!(opts.keybindings.key_for(KeyAction::ToggleParallax), Some("KeyP"));
    }

    #[test]
    fn partial_keybindings_keep_other_defaults() {
        let toml_str = r#"
[keybindings.bindings]
toggle_skybox = "KeyK"
"#;
        let opts: Options = toml::from_str(toml_str).unwrap();
        let keys = &opts.keybindings;
        assert_eq!(keys.lookup("KeyK"), Some(KeyAction::ToggleSkybox));
        assert_eq!(keys.lookup("KeyZ"), None);
        assert_eq!(keys.lookup("KeyW"), Some(KeyAction::MoveForward));
        assert_eq!(keys.lookup("Escape"), Some(KeyAction::Exit));
        assert_eq!(keys.bindings.len(), KeybindingOptions::default().bindings.len());
    }

    #[test]
    fn load_rebuilds_reverse_keymap() {
        let dir = std::env::temp_dir().join(format!("shadelab-opts-{}", std::process::id()));
        let path = dir.join("shadelab.toml");
        let mut opts = Options::default();
        let _ = opts
            .keybindings
            .bindings
            .insert(KeyAction::ToggleFog, "KeyG".into());
        opts.save(&path).unwrap();

        let loaded = Options::load(&path).unwrap();
        assert_eq!(loaded.keybindings.lookup("KeyG"), Some(KeyAction::ToggleFog));
        assert_eq!(loaded.keybindings.lookup("KeyF"), None);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("shadelab-does-not-exist.toml");
        assert_eq!(Options::load_or_default(&path), Options::default());
    }

    #[test]
    fn asset_paths_join_texture_dir() {
        let assets = AssetOptions::default();
        assert_eq!(
            assets.texture_path("wood.png"),
            Path::new("assets/textures").join("wood.png")
        );
    }
}
