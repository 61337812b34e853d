use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::input::KeyAction;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "BindingOverrides")]
/// Configurable keyboard bindings mapping actions to key codes.
///
/// A `[keybindings.bindings]` table only overrides the actions it names;
/// every other action keeps its default key.
pub struct KeybindingOptions {
    /// Maps action to key string (e.g. `ToggleSkybox` → `"KeyZ"`).
    pub bindings: HashMap<KeyAction, String>,
    /// Reverse lookup cache (key string → action). Rebuilt on load.
    #[serde(skip)]
    key_to_action: HashMap<String, KeyAction>,
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        let bindings = HashMap::from([
            (KeyAction::MoveForward, "KeyW".into()),
            (KeyAction::MoveBackward, "KeyS".into()),
            (KeyAction::MoveLeft, "KeyA".into()),
            (KeyAction::MoveRight, "KeyD".into()),
            (KeyAction::ToggleSkybox, "KeyZ".into()),
            (KeyAction::ToggleLighting, "KeyL".into()),
            (KeyAction::ToggleBlinn, "KeyB".into()),
            (KeyAction::ToggleFog, "KeyF".into()),
            (KeyAction::ToggleMonochrome, "KeyM".into()),
            (KeyAction::ToggleParallax, "KeyP".into()),
            (KeyAction::Exit, "Escape".into()),
        ]);

        let mut opts = Self {
            bindings,
            key_to_action: HashMap::new(),
        };
        opts.rebuild_reverse_map();
        opts
    }
}

/// On-disk form: only the actions the user rebinds.
#[derive(Deserialize)]
struct BindingOverrides {
    #[serde(default)]
    bindings: HashMap<KeyAction, String>,
}

impl From<BindingOverrides> for KeybindingOptions {
    fn from(overrides: BindingOverrides) -> Self {
        let mut opts = Self::default();
        opts.bindings.extend(overrides.bindings);
        opts.rebuild_reverse_map();
        opts
    }
}

// The reverse map is a cache; equality is defined by the bindings alone.
impl PartialEq for KeybindingOptions {
    fn eq(&self, other: &Self) -> bool {
        self.bindings == other.bindings
    }
}

impl Eq for KeybindingOptions {}

impl KeybindingOptions {
    /// Rebuild the reverse lookup map (key string → action).
    pub fn rebuild_reverse_map(&mut self) {
        self.key_to_action.clear();
        for (action, key) in &self.bindings {
            let _ = self.key_to_action.insert(key.clone(), *action);
        }
    }

    /// Look up the action for a key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<KeyAction> {
        self.key_to_action.get(key).copied()
    }

    /// Key string bound to `action`, if any.
    #[must_use]
    pub fn key_for(&self, action: KeyAction) -> Option<&str> {
        self.bindings.get(&action).map(String::as_str)
    }
}
