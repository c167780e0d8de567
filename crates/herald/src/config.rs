//! # Engine Configuration
//!
//! Runtime knobs that are not part of any profile, loaded from TOML.
//!
//! ```toml
//! tick_rate = 60
//! hold_seconds = 5.0
//! blink_seconds = 0.5
//! cleanup_interval_seconds = 5.0
//! inbound_capacity = 1024
//! ```
//!
//! Missing keys take their defaults; unknown keys are rejected.

use std::path::{Path, PathBuf};

use herald_shared::{
    BLINK_INTERVAL_SECONDS, CLEANUP_INTERVAL_SECONDS, HOLD_DURATION_SECONDS, TICK_RATE,
};
use herald_ui::AnimatorTiming;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default inbound queue capacity.
pub const DEFAULT_INBOUND_CAPACITY: usize = 1024;

/// Errors that can occur while loading a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for this structure.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range.
    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        /// Offending key.
        field: &'static str,
        /// Why it was rejected.
        reason: &'static str,
    },
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Ticks per second.
    pub tick_rate: u32,
    /// Seconds the typewriter holds the full text.
    pub hold_seconds: f32,
    /// Seconds between cursor blinks while holding.
    pub blink_seconds: f32,
    /// Seconds between peer-liveness sweeps.
    pub cleanup_interval_seconds: f32,
    /// Messages buffered between transport callbacks and the tick.
    pub inbound_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_rate: TICK_RATE,
            hold_seconds: HOLD_DURATION_SECONDS,
            blink_seconds: BLINK_INTERVAL_SECONDS,
            cleanup_interval_seconds: CLEANUP_INTERVAL_SECONDS,
            inbound_capacity: DEFAULT_INBOUND_CAPACITY,
        }
    }
}

impl EngineConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&source)
    }

    /// Rejects zero or non-positive values.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.tick_rate == 0 {
            return Err(ConfigError::Invalid { field: "tick_rate", reason: "must be at least 1" });
        }
        positive("hold_seconds", self.hold_seconds)?;
        positive("blink_seconds", self.blink_seconds)?;
        positive("cleanup_interval_seconds", self.cleanup_interval_seconds)?;
        if self.inbound_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "inbound_capacity",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }

    /// Typewriter timings for the animators.
    #[must_use]
    pub fn timing(&self) -> AnimatorTiming {
        AnimatorTiming { hold_seconds: self.hold_seconds, blink_seconds: self.blink_seconds }
    }

    /// Seconds per tick.
    #[must_use]
    pub fn tick_seconds(&self) -> f32 {
        1.0 / self.tick_rate.max(1) as f32
    }
}

fn positive(field: &'static str, value: f32) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid { field, reason: "must be a positive number of seconds" })
    }
}
