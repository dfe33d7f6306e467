//! Centralized scroll/layout/rendering options with TOML file support.
//!
//! Every constant the demo uses (tilt sensitivity, clamp bound, breakpoints,
//! camera, lights, key bindings) lives here. Options serialize to/from TOML
//! so a partial file overriding only `[scroll]` is enough to retune the
//! feel.

mod camera;
mod keybindings;
mod layout;
mod lighting;
mod scroll;
mod sensor;

use std::path::Path;

pub use camera::CameraOptions;
pub use keybindings::KeybindingOptions;
pub use layout::LayoutOptions;
pub use lighting::LightingOptions;
pub use scroll::ScrollOptions;
pub use sensor::SensorOptions;
use serde::{Deserialize, Serialize};

use crate::error::TiltScrollError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Tilt-to-scroll mapping.
    pub scroll: ScrollOptions,
    /// Mobile/desktop breakpoints and panel scale.
    pub layout: LayoutOptions,
    /// Camera projection.
    pub camera: CameraOptions,
    /// Background and lights.
    pub lighting: LightingOptions,
    /// Simulated sensor input.
    pub sensor: SensorOptions,
    /// Keyboard binding options.
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Parse options from a TOML string. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`TiltScrollError::OptionsParse`] on malformed TOML or an
    /// invalid value (e.g. a bad hex color).
    pub fn from_toml(content: &str) -> Result<Self, TiltScrollError> {
        toml::from_str(content)
            .map_err(|e| TiltScrollError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`TiltScrollError::Io`] if the file cannot be read, or
    /// [`TiltScrollError::OptionsParse`] if its contents do not parse.
    pub fn load(path: &Path) -> Result<Self, TiltScrollError> {
        let content =
            std::fs::read_to_string(path).map_err(TiltScrollError::Io)?;
        Self::from_toml(&content)
    }

    /// Save options to a TOML file (pretty-printed), creating parent
    /// directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`TiltScrollError::OptionsParse`] if serialization fails, or
    /// [`TiltScrollError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), TiltScrollError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TiltScrollError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(TiltScrollError::Io)?;
        }
        std::fs::write(path, content).map_err(TiltScrollError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyAction;
    use crate::scene::Rgb;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed = Options::from_toml(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[scroll]
sensitivity = 0.05
";
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.scroll.sensitivity, 0.05);
        // Everything else should be default
        assert_eq!(opts.scroll.max_offset, 10.0);
        assert_eq!(opts.layout.small_width, 600.0);
        assert_eq!(opts.camera.fovy, 75.0);
    }

    #[test]
    fn background_parses_from_hex() {
        let opts = Options::from_toml(
            r##"
[lighting]
background = "#202830"
"##,
        )
        .unwrap();
        assert_eq!(opts.lighting.background, Rgb::new(0x20, 0x28, 0x30));
    }

    #[test]
    fn bad_background_is_an_options_error() {
        let err = Options::from_toml(
            r#"
[lighting]
background = "teal"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, TiltScrollError::OptionsParse(_)));
    }

    #[test]
    fn keybinding_lookup() {
        let opts = Options::default();
        assert_eq!(
            opts.keybindings.lookup("ArrowDown"),
            Some(KeyAction::TiltForward)
        );
        assert_eq!(opts.keybindings.lookup("KeyW"), Some(KeyAction::TiltBack));
        assert_eq!(opts.keybindings.lookup("Home"), Some(KeyAction::ResetScroll));
        assert_eq!(opts.keybindings.lookup("KeyZ"), None);
    }

    #[test]
    fn save_then_load_restores_file() {
        let dir = std::env::temp_dir().join(format!(
            "tiltscroll-options-{}",
            std::process::id()
        ));
        let path = dir.join("nested").join("options.toml");
        let mut opts = Options::default();
        opts.scroll.max_offset = 12.0;
        opts.save(&path).unwrap();
        let loaded = Options::load(&path).unwrap();
        assert_eq!(loaded, opts);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
