//! Serializable countdown settings.
//!
//! ```rust
//! use bubbletea_countdown::config::CountdownConfig;
//!
//! let config = CountdownConfig::from_json(r#"{ "target_seconds": 90, "paused_text": "Paused" }"#).unwrap();
//! assert_eq!(config.target_seconds, 90.0);
//! assert!(config.show_mask);
//! assert_eq!(config.end_text, "Time over");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::format::DEFAULT_END_TEXT;

/// Errors raised while loading a [`CountdownConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid JSON for a countdown.
    #[error("invalid countdown config: {0}")]
    Json(#[from] serde_json::Error),
    /// The duration is NaN or infinite.
    #[error("target_seconds must be a finite number (got {value})")]
    NonFiniteTarget {
        /// Offending value.
        value: f64,
    },
}

/// Caller-facing settings of a countdown.
///
/// `target_seconds` below one second is accepted and treated as one second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountdownConfig {
    /// Requested length of a run, in seconds.
    pub target_seconds: f64,
    /// Truncate the display to the units that matter.
    #[serde(default = "CountdownConfig::default_show_mask")]
    pub show_mask: bool,
    /// Start suspended.
    #[serde(default)]
    pub paused: bool,
    /// Shown instead of the time while paused.
    #[serde(default)]
    pub paused_text: Option<String>,
    /// Shown once time is up.
    #[serde(default = "CountdownConfig::default_end_text")]
    pub end_text: String,
}

impl CountdownConfig {
    fn default_show_mask() -> bool {
        true
    }

    fn default_end_text() -> String {
        DEFAULT_END_TEXT.to_string()
    }

    /// Settings for a countdown of `target_seconds` with every other field
    /// at its default.
    pub fn new(target_seconds: f64) -> Self {
        Self {
            target_seconds,
            show_mask: Self::default_show_mask(),
            paused: false,
            paused_text: None,
            end_text: Self::default_end_text(),
        }
    }

    /// Parses settings from JSON.
    pub fn from_json(input: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values no normalization can make sense of.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.target_seconds.is_finite() {
            return Err(ConfigError::NonFiniteTarget {
                value: self.target_seconds,
            });
        }
        Ok(())
    }
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self::new(60.0)
    }
}
