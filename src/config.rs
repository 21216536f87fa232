//! Settings file.
//!
//! Every field has a default, so an empty file (or no file) is a valid
//! configuration. Times are given in milliseconds.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::engine::EngineSettings;
use crate::orbit::{Orbit, ViewAngles};
use crate::persistence::default_best_time_path;
use crate::scramble::DEFAULT_SCRAMBLE_LENGTH;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub engine: EngineConfig,
    pub view: ViewConfig,
    pub storage: StorageConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub turn_ms: u64,
    pub playback_turn_ms: u64,
    pub playback_pause_ms: u64,
    pub scramble_length: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let settings = EngineSettings::default();
        Self {
            turn_ms: settings.turn_duration.as_millis() as u64,
            playback_turn_ms: settings.playback_turn_duration.as_millis() as u64,
            playback_pause_ms: settings.playback_pause.as_millis() as u64,
            scramble_length: DEFAULT_SCRAMBLE_LENGTH,
        }
    }
}

impl EngineConfig {
    pub fn settings(&self) -> EngineSettings {
        EngineSettings {
            turn_duration: Duration::from_millis(self.turn_ms),
            playback_turn_duration: Duration::from_millis(self.playback_turn_ms),
            playback_pause: Duration::from_millis(self.playback_pause_ms),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewConfig {
    /// Degrees of rotation per pixel dragged.
    pub sensitivity: f32,
    pub yaw: f32,
    pub elevation: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        let angles = Orbit::default().angles();
        Self {
            sensitivity: 0.5,
            yaw: angles.yaw,
            elevation: angles.elevation,
        }
    }
}

impl ViewConfig {
    pub fn orbit(&self) -> Orbit {
        Orbit::new(
            ViewAngles {
                yaw: self.yaw,
                elevation: self.elevation,
            },
            self.sensitivity,
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// Overrides the default best-time location.
    pub best_time_path: Option<PathBuf>,
    pub persist_best_time: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            best_time_path: None,
            persist_best_time: true,
        }
    }
}

impl StorageConfig {
    /// Where the best time lives, or `None` when persistence is off or no
    /// data directory is known.
    pub fn resolved_best_time_path(&self) -> Option<PathBuf> {
        if !self.persist_best_time {
            return None;
        }
        self.best_time_path.clone().or_else(default_best_time_path)
    }
}

impl Config {
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads the file at `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text, path)
    }
}
