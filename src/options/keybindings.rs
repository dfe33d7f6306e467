//! `[keybindings]` section.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::input::KeyAction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Keyboard bindings for the native viewer.
///
/// Keys use the `winit::keyboard::KeyCode` debug format (`"ArrowUp"`,
/// `"KeyW"`, ...). Several keys may map to the same action.
pub struct KeybindingOptions {
    /// Maps key string → action.
    pub bindings: HashMap<String, KeyAction>,
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        let bindings = HashMap::from([
            ("ArrowDown".into(), KeyAction::TiltForward),
            ("KeyS".into(), KeyAction::TiltForward),
            ("ArrowUp".into(), KeyAction::TiltBack),
            ("KeyW".into(), KeyAction::TiltBack),
            ("Home".into(), KeyAction::ResetScroll),
            ("KeyR".into(), KeyAction::ResetScroll),
        ]);
        Self { bindings }
    }
}

impl KeybindingOptions {
    /// Look up the action for a key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<KeyAction> {
        self.bindings.get(key).copied()
    }
}
