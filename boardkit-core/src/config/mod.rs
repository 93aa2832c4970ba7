//! Configuration management for `Boardkit`
//!
//! This module provides the `ConfigManager` for loading and saving the
//! editor settings file in TOML format.

mod manager;
pub mod settings;

pub use manager::{CONFIG_DIR_ENV, ConfigError, ConfigManager, ConfigResult, SETTINGS_FILE};
pub use settings::{DocumentSettings, DragSettings, EditorSettings, LoggingSettings};
