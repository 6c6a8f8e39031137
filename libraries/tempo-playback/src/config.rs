//! Playback configuration

use crate::error::{PlaybackError, Result};
use crate::types::RepeatMode;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the playback engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Initial volume (0.0-1.0, default: 1.0)
    pub volume: f64,

    /// Initial repeat mode (default: Off)
    pub repeat: RepeatMode,

    /// Start with shuffle enabled (default: false)
    pub shuffle: bool,

    /// "Previous" restarts the current track past this position (default: 3s)
    pub previous_restart_threshold_secs: f64,

    /// Volume restored when unmuting at zero volume (default: 0.5)
    pub unmute_volume: f64,

    /// Fixed shuffle seed; `None` seeds from entropy
    pub shuffle_seed: Option<u64>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: 1.0,
            repeat: RepeatMode::Off,
            shuffle: false,
            previous_restart_threshold_secs: 3.0,
            unmute_volume: 0.5,
            shuffle_seed: None,
        }
    }
}

impl PlaybackConfig {
    /// Load configuration from an optional file and the environment
    ///
    /// Environment variables are prefixed with `TEMPO_`, e.g. `TEMPO_VOLUME=0.6`
    /// or `TEMPO_REPEAT=all`, and override file values.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = path {
            settings = settings.add_source(config::File::from(path));
        }

        settings = settings.add_source(
            config::Environment::with_prefix("TEMPO")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(PlaybackError::InvalidConfig(format!(
                "volume must be within 0.0-1.0, got {}",
                self.volume
            )));
        }

        if !(0.0..=1.0).contains(&self.unmute_volume) || self.unmute_volume == 0.0 {
            return Err(PlaybackError::InvalidConfig(format!(
                "unmute_volume must be within (0.0, 1.0], got {}",
                self.unmute_volume
            )));
        }

        if !self.previous_restart_threshold_secs.is_finite()
            || self.previous_restart_threshold_secs < 0.0
        {
            return Err(PlaybackError::InvalidConfig(format!(
                "previous_restart_threshold_secs must be non-negative, got {}",
                self.previous_restart_threshold_secs
            )));
        }

        Ok(())
    }
}
