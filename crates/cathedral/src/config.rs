//! Application configuration loaded from TOML.

use crate::players::PlayerKind;
use cathedral_rules::GameSettings;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "cathedral.toml";

/// Configuration for a match.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// Who plays Light (and the Church turn).
    #[serde(default = "default_light")]
    light: PlayerKind,

    /// Who plays Dark.
    #[serde(default = "default_dark")]
    dark: PlayerKind,

    /// Seed for computer players; random when absent.
    #[serde(default)]
    seed: Option<u64>,

    /// Rule variants for new games.
    #[serde(default)]
    settings: GameSettings,
}

#[instrument]
fn default_light() -> PlayerKind {
    PlayerKind::LocalHuman
}

#[instrument]
fn default_dark() -> PlayerKind {
    PlayerKind::RandomComputer
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(GameSettings::standard(), default_light(), default_dark(), None)
    }
}

impl AppConfig {
    /// Creates a configuration.
    pub fn new(
        settings: GameSettings,
        light: PlayerKind,
        dark: PlayerKind,
        seed: Option<u64>,
    ) -> Self {
        Self {
            settings,
            light,
            dark,
            seed,
        }
    }

    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {e}")))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {e}")))?;

        info!(light = %config.light, dark = %config.dark, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!(path = %path.as_ref().display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Serializes this configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::new(format!("Failed to write config: {e}")))
    }

    /// Replaces the Light seat.
    pub fn with_light(mut self, light: PlayerKind) -> Self {
        self.light = light;
        self
    }

    /// Replaces the Dark seat.
    pub fn with_dark(mut self, dark: PlayerKind) -> Self {
        self.dark = dark;
        self
    }

    /// Replaces the computer seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replaces the rule variants.
    pub fn with_settings(mut self, settings: GameSettings) -> Self {
        self.settings = settings;
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
