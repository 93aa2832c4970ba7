//! Editor settings
//!
//! All sections default individually, so a settings file only needs the keys
//! it wants to change:
//!
//! ```toml
//! [split_limits]
//! mobile = 0
//!
//! [drag]
//! claim_window_ms = 300
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::manager::{ConfigError, ConfigResult};
use crate::layout::{DragReconciler, DropZoneConfig, SplitLimits};
use crate::tracing::TracingLevel;

/// Deepest split level a settings file may allow on any viewport
pub const MAX_CONFIGURABLE_SPLIT_LEVEL: u32 = 4;

/// Longest accepted claim window
pub const MAX_CLAIM_WINDOW_MS: u64 = 5_000;

/// Top-level settings file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Per-viewport split caps
    pub split_limits: SplitLimits,
    /// Drag-and-drop tuning
    pub drag: DragSettings,
    /// New document defaults
    pub documents: DocumentSettings,
    /// Logging
    pub logging: LoggingSettings,
}

/// Drag-and-drop tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragSettings {
    /// How long a drop claim blocks duplicate drops, in milliseconds
    pub claim_window_ms: u64,
    /// Share of a block row that counts as "insert before"
    pub drop_zone_ratio: f64,
    /// Height of a block row in pixels
    pub row_height: f64,
}

impl Default for DragSettings {
    fn default() -> Self {
        let zone = DropZoneConfig::default();
        Self {
            claim_window_ms: 500,
            drop_zone_ratio: zone.drop_zone_ratio,
            row_height: zone.row_height,
        }
    }
}

/// New document defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentSettings {
    /// Title given to new documents
    pub default_title: String,
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self {
            default_title: "Untitled page".to_string(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Base log level (raised by `-v` on the command line)
    pub level: TracingLevel,
    /// Custom `EnvFilter` directive, overrides `level`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl EditorSettings {
    /// Checks value ranges and that split caps shrink from desktop to mobile
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the first bad key
    pub fn validate(&self) -> ConfigResult<()> {
        let limits = self.split_limits;
        for (name, value) in [
            ("split_limits.desktop", limits.desktop),
            ("split_limits.tablet", limits.tablet),
            ("split_limits.mobile", limits.mobile),
        ] {
            if value > MAX_CONFIGURABLE_SPLIT_LEVEL {
                return Err(ConfigError::Invalid(format!(
                    "{name} = {value} exceeds {MAX_CONFIGURABLE_SPLIT_LEVEL}"
                )));
            }
        }
        if limits.mobile > limits.tablet || limits.tablet > limits.desktop {
            return Err(ConfigError::Invalid(format!(
                "split_limits must not deepen on smaller viewports \
                 (desktop = {}, tablet = {}, mobile = {})",
                limits.desktop, limits.tablet, limits.mobile
            )));
        }
        if self.drag.claim_window_ms == 0 || self.drag.claim_window_ms > MAX_CLAIM_WINDOW_MS {
            return Err(ConfigError::Invalid(format!(
                "drag.claim_window_ms must be within 1..={MAX_CLAIM_WINDOW_MS}"
            )));
        }
        if !(self.drag.drop_zone_ratio > 0.0 && self.drag.drop_zone_ratio < 1.0) {
            return Err(ConfigError::Invalid(
                "drag.drop_zone_ratio must be between 0 and 1".to_string(),
            ));
        }
        if !(self.drag.row_height.is_finite() && self.drag.row_height > 0.0) {
            return Err(ConfigError::Invalid(
                "drag.row_height must be positive".to_string(),
            ));
        }
        if self.documents.default_title.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "documents.default_title must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the drop claim window
    #[must_use]
    pub const fn claim_window(&self) -> Duration {
        Duration::from_millis(self.drag.claim_window_ms)
    }

    /// Returns the drop-zone geometry
    #[must_use]
    pub const fn drop_zone(&self) -> DropZoneConfig {
        DropZoneConfig {
            row_height: self.drag.row_height,
            drop_zone_ratio: self.drag.drop_zone_ratio,
        }
    }

    /// Builds a drag reconciler configured from these settings
    #[must_use]
    pub fn reconciler(&self) -> DragReconciler {
        DragReconciler::new(self.claim_window()).with_drop_zone(self.drop_zone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = EditorSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.claim_window(), Duration::from_millis(500));
        assert_eq!(settings.split_limits, SplitLimits::default());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let settings: EditorSettings = toml::from_str(
            r#"
            [split_limits]
            mobile = 0

            [drag]
            claim_window_ms = 300
            "#,
        )
        .unwrap();
        assert_eq!(settings.split_limits.mobile, 0);
        assert_eq!(settings.split_limits.desktop, 2);
        assert_eq!(settings.claim_window(), Duration::from_millis(300));
        assert_eq!(settings.documents, DocumentSettings::default());
    }

    #[test]
    fn empty_toml_is_default() {
        let settings: EditorSettings = toml::from_str("").unwrap();
        assert_eq!(settings, EditorSettings::default());
    }

    #[test]
    fn toml_roundtrip() {
        let mut settings = EditorSettings::default();
        settings.logging.level = TracingLevel::Debug;
        settings.documents.default_title = "Home".to_string();
        let text = toml::to_string(&settings).unwrap();
        assert!(text.contains("level = \"debug\""));
        assert_eq!(toml::from_str::<EditorSettings>(&text).unwrap(), settings);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let mut settings = EditorSettings::default();
        settings.split_limits.desktop = 9;
        assert!(matches!(settings.validate(), Err(ConfigError::Invalid(_))));

        let mut settings = EditorSettings::default();
        settings.drag.claim_window_ms = 0;
        assert!(settings.validate().is_err());

        let mut settings = EditorSettings::default();
        settings.drag.drop_zone_ratio = 1.5;
        assert!(settings.validate().is_err());

        let mut settings = EditorSettings::default();
        settings.documents.default_title = "  ".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn split_limits_must_not_grow_on_smaller_viewports() {
        let mut settings = EditorSettings::default();
        settings.split_limits.mobile = 3;
        settings.split_limits.desktop = 3;
        assert!(matches!(settings.validate(), Err(ConfigError::Invalid(ref m)) if m.contains("mobile = 3")));

        let mut settings = EditorSettings::default();
        settings.split_limits.tablet = 3;
        assert!(settings.validate().is_err());

        let settings: EditorSettings =
            toml::from_str("[split_limits]\ndesktop = 1\ntablet = 1\nmobile = 1\n").unwrap();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn reconciler_uses_claim_window() {
        let mut settings = EditorSettings::default();
        settings.drag.claim_window_ms = 250;
        assert_eq!(settings.reconciler().claim_window(), Duration::from_millis(250));
    }
}
