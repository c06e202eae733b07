//! Host-shell preferences persisted as a JSON dotfile.
//!
//! Gameplay constants live in `crate::consts`; this file only covers knobs
//! that are safe to tweak between sessions.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Frame pacing target for the game loop.
    pub target_fps: u32,
    /// Show the frame-rate readout in the HUD.
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            target_fps: 60,
            show_fps: false,
        }
    }
}

impl Settings {
    fn path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".last_survivor_settings.json")
    }

    /// Parse a settings document. Missing fields fall back to their defaults
    /// and unknown fields are ignored.
    pub fn parse(json: &str) -> Option<Settings> {
        serde_json::from_str(json).ok()
    }

    /// Load settings from the dotfile, falling back to defaults. A missing
    /// file is created with defaults so users have something to edit.
    pub fn load() -> Settings {
        let path = Self::path();
        match std::fs::read_to_string(&path) {
            Ok(json) => match Self::parse(&json) {
                Some(settings) => {
                    log::info!("loaded settings from {}", path.display());
                    settings
                }
                None => {
                    log::warn!("could not parse {}, using defaults", path.display());
                    Settings::default()
                }
            },
            Err(_) => {
                log::info!("writing default settings to {}", path.display());
                let settings = Settings::default();
                settings.save();
                settings
            }
        }
    }

    /// Write the current settings back to the dotfile.
    pub fn save(&self) {
        let path = Self::path();
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(err) = std::fs::write(&path, json) {
                    log::warn!("could not write {}: {err}", path.display());
                }
            }
            Err(err) => log::warn!("could not serialize settings: {err}"),
        }
    }
}
