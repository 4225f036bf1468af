//! Settings persistence
//!
//! Saves and loads [`GameSettings`] to/from a JSON file in the user's
//! configuration directory, e.g.
//! `~/.config/hotseatboard/settings.json` on Linux.
//!
//! # Error Handling
//!
//! Loading never fails: a missing or unreadable file falls back to defaults
//! with a log line. Saving returns a [`CoreResult`] so the caller decides
//! whether a write failure matters.

use crate::core::error::{CoreError, CoreResult};
use crate::game::ControllerSettings;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Settings filename
const SETTINGS_FILENAME: &str = "settings.json";

/// User preferences for the board
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Draw legal-move markers for the selected piece
    pub show_hints: bool,
    /// Ignore input once the game is decided
    pub freeze_on_game_over: bool,
    /// Board clicks outside the promotion chooser abandon the promotion
    pub cancel_promotion_on_board_click: bool,
    /// Square edge in pixels
    pub tile_size: f32,
    /// Piece slide duration in seconds
    pub animation_secs: f32,
    /// Directory (under the asset root) holding `wp.png`, `bk.png`, ...
    pub piece_asset_dir: String,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            show_hints: true,
            freeze_on_game_over: true,
            cancel_promotion_on_board_click: false,
            tile_size: 80.0,
            animation_secs: 0.2,
            piece_asset_dir: "pieces".to_string(),
        }
    }
}

impl GameSettings {
    /// Controller behaviour switches carried by these settings
    pub fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            show_hints: self.show_hints,
            freeze_on_game_over: self.freeze_on_game_over,
            cancel_promotion_on_board_click: self.cancel_promotion_on_board_click,
        }
    }

    /// Load from `path`, or from the default location when `None`
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let settings_path = match path {
            Some(path) => path.to_path_buf(),
            None => match default_settings_path() {
                Ok(path) => path,
                Err(e) => {
                    warn!("[SETTINGS] {}. Using defaults.", e);
                    return Self::default();
                }
            },
        };

        if !settings_path.exists() {
            info!(
                "[SETTINGS] No settings file found at {:?}. Using defaults.",
                settings_path
            );
            return Self::default();
        }

        match Self::load(&settings_path) {
            Ok(settings) => {
                info!("[SETTINGS] Loaded settings from {:?}", settings_path);
                settings
            }
            Err(e) => {
                warn!(
                    "[SETTINGS] Failed to load settings file at {:?}: {}. Using defaults.",
                    settings_path, e
                );
                Self::default()
            }
        }
    }

    /// Strict load; errors on a missing or malformed file
    pub fn load(path: &Path) -> CoreResult<Self> {
        let contents = fs::read_to_string(path)?;
        let settings = serde_json::from_str::<GameSettings>(&contents)?;
        Ok(settings.sanitized())
    }

    /// Write as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> CoreResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        info!("[SETTINGS] Saved settings to {:?}", path);
        Ok(())
    }

    /// Replace out-of-range numbers with defaults
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.tile_size.is_finite() && self.tile_size > 0.0) {
            warn!(
                "[SETTINGS] tile_size {} out of range, using {}",
                self.tile_size, defaults.tile_size
            );
            self.tile_size = defaults.tile_size;
        }
        if !(self.animation_secs.is_finite() && self.animation_secs >= 0.0) {
            warn!(
                "[SETTINGS] animation_secs {} out of range, using {}",
                self.animation_secs, defaults.animation_secs
            );
            self.animation_secs = defaults.animation_secs;
        }
        self
    }
}

/// `settings.json` in the platform config directory
pub fn default_settings_path() -> CoreResult<PathBuf> {
    ProjectDirs::from("com", "trilltino", "HotseatBoard")
        .map(|dirs| dirs.config_dir().join(SETTINGS_FILENAME))
        .ok_or(CoreError::NoConfigDir)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("hotseat_board_{}_{}", std::process::id(), name))
            .join(SETTINGS_FILENAME)
    }

    #[test]
    fn test_defaults() {
        let settings = GameSettings::default();
        assert!(settings.show_hints);
        assert!(settings.freeze_on_game_over);
        assert!(!settings.cancel_promotion_on_board_click);
        assert_eq!(settings.tile_size, 80.0);
        assert_eq!(settings.controller_settings(), ControllerSettings::default());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: GameSettings = serde_json::from_str(r#"{ "show_hints": false }"#).unwrap();
        assert!(!settings.show_hints);
        assert_eq!(settings.animation_secs, 0.2);
        assert_eq!(settings.piece_asset_dir, "pieces");
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("save_then_load");
        let settings = GameSettings {
            cancel_promotion_on_board_click: true,
            tile_size: 64.0,
            ..GameSettings::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(GameSettings::load(&path).unwrap(), settings);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let path = temp_path("missing");
        assert_eq!(
            GameSettings::load_or_default(Some(&path)),
            GameSettings::default()
        );
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let path = temp_path("malformed");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            GameSettings::load(&path),
            Err(CoreError::SettingsSerialization(_))
        ));
        assert_eq!(
            GameSettings::load_or_default(Some(&path)),
            GameSettings::default()
        );
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_out_of_range_numbers_are_sanitized() {
        let settings: GameSettings =
            serde_json::from_str(r#"{ "tile_size": -4.0, "animation_secs": -1.0 }"#).unwrap();
        let settings = settings.sanitized();
        assert_eq!(settings.tile_size, 80.0);
        assert_eq!(settings.animation_secs, 0.2);
    }
}
