//! Application configuration
//!
//! Defaults can be overridden by an optional TOML file read at startup and
//! then by command-line flags. Nothing is ever written back.

use crate::speech::engine::{EngineConfig, UtteranceRequest};
use crate::{ReadAloudError, Result};
use serde::Deserialize;
use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Slider range for speed in words per minute
pub const SPEED_RANGE: RangeInclusive<u32> = 80..=450;
/// Slider range for pitch
pub const PITCH_RANGE: RangeInclusive<u32> = 0..=99;
/// Slider range for volume (amplitude)
pub const VOLUME_RANGE: RangeInclusive<u32> = 0..=200;

/// Voice parameters passed to the engine with every utterance
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VoiceSettings {
    pub speed: u32,
    pub pitch: u32,
    pub volume: u32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            speed: 280,
            pitch: 40,
            volume: 100,
        }
    }
}

impl VoiceSettings {
    /// Clamp every value into its slider range
    pub fn clamped(self) -> Self {
        Self {
            speed: self.speed.clamp(*SPEED_RANGE.start(), *SPEED_RANGE.end()),
            pitch: self.pitch.clamp(*PITCH_RANGE.start(), *PITCH_RANGE.end()),
            volume: self.volume.clamp(*VOLUME_RANGE.start(), *VOLUME_RANGE.end()),
        }
    }

    /// Bundle these settings with text into a request
    pub fn request(&self, text: impl Into<String>) -> UtteranceRequest {
        UtteranceRequest::new(text, self.speed, self.pitch, self.volume)
    }
}

/// Top-level configuration
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// External speech program
    pub engine: EngineConfig,

    /// Initial slider values
    pub voice: VoiceSettings,

    /// Completion polling cadence while speaking
    pub poll_interval_ms: u64,

    /// Time to wait after terminate before killing
    pub stop_timeout_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            voice: VoiceSettings::default(),
            poll_interval_ms: 100,
            stop_timeout_ms: 2000,
        }
    }
}

impl AppConfig {
    /// Default location: `<config dir>/readaloud/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("readaloud").join("config.toml"))
    }

    /// Load and validate a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ReadAloudError::ConfigError(format!("{}: {}", path.display(), e))
        })?;

        let config: AppConfig = toml::from_str(&content).map_err(|e| {
            ReadAloudError::ConfigError(format!("{}: {}", path.display(), e))
        })?;

        config.validate()?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load the file at the default location, or defaults if there is none
    pub fn load_or_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(path),
            _ => {
                debug!("No configuration file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Set the speech program
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.engine.program = program.into();
        self
    }

    /// Set the initial voice settings
    pub fn with_voice(mut self, voice: VoiceSettings) -> Self {
        self.voice = voice;
        self
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn stop_timeout(&self) -> Duration {
        Duration::from_millis(self.stop_timeout_ms)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.engine.program.trim().is_empty() {
            return Err(ReadAloudError::ConfigError(
                "engine.program must not be empty".into(),
            ));
        }

        if self.poll_interval_ms == 0 {
            return Err(ReadAloudError::ConfigError(
                "poll_interval_ms must be greater than zero".into(),
            ));
        }

        if self.stop_timeout_ms == 0 {
            return Err(ReadAloudError::ConfigError(
                "stop_timeout_ms must be greater than zero".into(),
            ));
        }

        Ok(())
    }
}
