//! Game settings and preferences
//!
//! Loaded from an optional `settings.json` next to the executable's working
//! directory; any missing or unreadable file falls back to defaults. Game
//! state is never persisted, only these preferences.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Mute all sound
    pub muted: bool,

    // === HUD ===
    /// Log the measured frame rate once per second
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            muted: false,
            show_fps: false,
        }
    }
}

impl Settings {
    pub const FILE_NAME: &'static str = "settings.json";

    /// Load from `settings.json` in the working directory, defaults if
    /// absent or malformed.
    pub fn load() -> Self {
        Self::load_from(Path::new(Self::FILE_NAME))
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("ignoring malformed {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.master_volume, 0.8);
        assert!(!s.muted);
        assert!(!s.show_fps);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let s = Settings::load_from(Path::new("/nonexistent/settings.json"));
        assert_eq!(s.master_volume, Settings::default().master_volume);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s: Settings = serde_json::from_str(r#"{"muted": true}"#).unwrap();
        assert!(s.muted);
        assert_eq!(s.master_volume, 0.8);
    }
}
