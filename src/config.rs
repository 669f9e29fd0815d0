//! Stream configuration
//!
//! The codec core takes no configuration beyond its [`PackingMode`]. The
//! stream workers and binaries around it are configured here, from a TOML
//! file or defaults.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::codec::PackingMode;
use crate::constants::*;
use crate::error::{Error, Result};

/// Configuration for one encode or decode stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Sample rate in Hz; informational only, the codec is rate-agnostic
    pub sample_rate: u32,
    /// Interleaved samples per encoder chunk (two per stereo frame)
    pub chunk_samples: usize,
    /// Output byte packing used by the encoder
    pub packing: PackingMode,
    /// Capacity of the bounded queues between worker threads
    pub queue_capacity: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            chunk_samples: DEFAULT_CHUNK_SAMPLES,
            packing: PackingMode::default(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl StreamConfig {
    /// Parse and validate a TOML document
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&text)?;
        tracing::debug!("Loaded stream config from {}", path.display());
        Ok(config)
    }

    /// Load the per-user config file if present, defaults otherwise
    pub fn load_or_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }

    /// Per-user config file location
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "stereo-adpcm").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Serialize as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Check invariants the workers rely on
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(Error::Config("sample_rate must be positive".into()));
        }
        if self.chunk_samples == 0 || self.chunk_samples % 2 != 0 {
            return Err(Error::Config(format!(
                "chunk_samples must be a positive even number, got {}",
                self.chunk_samples
            )));
        }
        if self.queue_capacity == 0 {
            return Err(Error::Config("queue_capacity must be positive".into()));
        }
        Ok(())
    }

    /// Stereo frames per encoder chunk
    pub fn chunk_frames(&self) -> usize {
        self.chunk_samples / 2
    }

    /// Chunk duration in milliseconds
    pub fn chunk_duration_ms(&self) -> f32 {
        self.chunk_frames() as f32 * 1000.0 / self.sample_rate as f32
    }
}
