//! Board configuration loaded from TOML.
//!
//! ```toml
//! [scheduler]
//! batch_size = 20
//! batch_delay_ms = 16
//! reset_after_ms = 1000
//!
//! [[displays]]
//! value = "12:45"
//! chars = "0123456789:"
//! length = 5
//!
//! [[displays]]
//! value = "BOARDING"
//! words = ["BOARDING", "DELAYED", "GATE CLOSED"]
//! ```
//!
//! Omitting `[scheduler]` gives a board without staggering.

use crate::display::DisplayConfig;
use crate::scheduler::SchedulerConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The TOML was malformed or had wrong types.
    #[error("invalid board configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for configuration loading.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Scheduler options as written in a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SchedulerSection {
    /// Digits per concurrent-start batch.
    pub batch_size: usize,
    /// Delay per batch index in milliseconds.
    pub batch_delay_ms: u64,
    /// Inactivity window in milliseconds.
    pub reset_after_ms: u64,
}

impl Default for SchedulerSection {
    fn default() -> Self {
        let defaults = SchedulerConfig::default();
        Self {
            batch_size: defaults.batch_size,
            batch_delay_ms: u64::try_from(defaults.batch_delay.as_millis()).unwrap_or(u64::MAX),
            reset_after_ms: u64::try_from(defaults.reset_after.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

impl From<SchedulerSection> for SchedulerConfig {
    fn from(section: SchedulerSection) -> Self {
        Self {
            batch_size: section.batch_size,
            batch_delay: Duration::from_millis(section.batch_delay_ms),
            reset_after: Duration::from_millis(section.reset_after_ms),
        }
        .normalized()
    }
}

/// A whole board: optional stagger plus displays in mount order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Stagger options; `None` disables staggering.
    pub scheduler: Option<SchedulerSection>,
    /// Displays in mount order.
    pub displays: Vec<DisplayConfig>,
}

impl BoardConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        tracing::debug!(
            displays = config.displays.len(),
            stagger = config.scheduler.is_some(),
            "board configuration parsed"
        );
        Ok(config)
    }

    /// Load a configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
