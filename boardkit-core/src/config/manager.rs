//! Settings file location and persistence

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::settings::EditorSettings;
use crate::tracing::span_names;

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "BOARDKIT_CONFIG_DIR";

/// Settings file name inside the configuration directory
pub const SETTINGS_FILE: &str = "settings.toml";

/// Sub-directory holding layout documents
const DOCUMENTS_DIR: &str = "documents";

/// Errors that can occur while reading or writing settings
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No configuration directory could be determined
    #[error("Could not determine configuration directory")]
    NoConfigDir,

    /// The settings file could not be read
    #[error("Failed to read {path}: {message}")]
    Read {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        message: String,
    },

    /// The settings file could not be written
    #[error("Failed to write {path}: {message}")]
    Write {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        message: String,
    },

    /// The settings file is not valid TOML for the settings schema
    #[error("Failed to parse settings: {0}")]
    Parse(String),

    /// Settings could not be serialized
    #[error("Failed to serialize settings: {0}")]
    Serialize(String),

    /// A setting is out of range
    #[error("Invalid setting: {0}")]
    Invalid(String),
}

/// Result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Locates and persists the editor settings
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Creates a manager for the default configuration directory
    ///
    /// Uses `$BOARDKIT_CONFIG_DIR` if set, otherwise `boardkit` under the
    /// platform configuration directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoConfigDir` if neither is available
    pub fn new() -> ConfigResult<Self> {
        let config_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => dirs::config_dir()
                .map(|dir| dir.join("boardkit"))
                .ok_or(ConfigError::NoConfigDir)?,
        };
        Ok(Self { config_dir })
    }

    /// Creates a manager for an explicit directory
    #[must_use]
    pub const fn with_config_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    /// Returns the configuration directory
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Returns the settings file path
    #[must_use]
    pub fn settings_path(&self) -> PathBuf {
        self.config_dir.join(SETTINGS_FILE)
    }

    /// Returns the default directory for layout documents
    #[must_use]
    pub fn documents_dir(&self) -> PathBuf {
        self.config_dir.join(DOCUMENTS_DIR)
    }

    /// Loads settings, falling back to defaults when the file is missing
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed or
    /// validated
    pub fn load_settings(&self) -> ConfigResult<EditorSettings> {
        let path = self.settings_path();
        let _span = crate::trace_operation!(span_names::CONFIG_LOAD, path = %path.display()).entered();

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No settings file, using defaults");
                return Ok(EditorSettings::default());
            }
            Err(e) => {
                return Err(ConfigError::Read {
                    path,
                    message: e.to_string(),
                });
            }
        };
        let settings: EditorSettings =
            toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validates and writes settings, creating the directory if needed
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid or cannot be written
    pub fn save_settings(&self, settings: &EditorSettings) -> ConfigResult<()> {
        settings.validate()?;
        let content =
            toml::to_string_pretty(settings).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        std::fs::create_dir_all(&self.config_dir).map_err(|e| ConfigError::Write {
            path: self.config_dir.clone(),
            message: e.to_string(),
        })?;
        let path = self.settings_path();
        std::fs::write(&path, content).map_err(|e| ConfigError::Write {
            path: path.clone(),
            message: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "Saved settings");
        Ok(())
    }
}
