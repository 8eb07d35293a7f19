//! Game settings
//!
//! Read once at startup and never written back. Native builds take an
//! optional JSON file; the web build reads flags from the page URL.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::START_LIVES;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid settings json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("start_lives must be at least 1")]
    NoLives,
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Enables the skip-level key
    pub debug: bool,
    /// Show FPS counter
    pub show_fps: bool,
    /// Lives at the start of each game
    pub start_lives: u32,
    /// Fixed RNG seed; random per run when unset
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: false,
            show_fps: false,
            start_lives: START_LIVES,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse and validate settings. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.start_lives == 0 {
            return Err(SettingsError::NoLives);
        }
        Ok(())
    }

    /// Apply `?debug`, `?fps` and `?seed=N` style query flags
    pub fn apply_query(&mut self, query: &str) {
        for pair in query.trim_start_matches('?').split('&') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "debug" => self.debug = value != "0",
                "fps" => self.show_fps = value != "0",
                "seed" => match value.parse() {
                    Ok(seed) => self.seed = Some(seed),
                    Err(_) => log::warn!("Ignoring bad seed {:?}", value),
                },
                _ => {}
            }
        }
    }

    /// Load settings from the page URL (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let mut settings = Self::default();
        let query = web_sys::window().and_then(|w| w.location().search().ok());
        if let Some(query) = query {
            settings.apply_query(&query);
        }
        log::info!("Settings: {:?}", settings);
        settings
    }

    /// Load settings from an optional JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: Option<&std::path::Path>) -> Result<Self, SettingsError> {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Ok(Self::default());
        };
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}
