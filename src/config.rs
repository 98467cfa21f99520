//! # Mine Configuration
//!
//! All tunables of a simulation run. Every field has a default, so a TOML
//! file only needs the values it changes:
//!
//! ```toml
//! stations = 6
//! engine_time_ms = 100
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::pause::PauseBounds;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MineConfig {
    /// Number of stations along the line.
    pub stations: usize,
    pub mining_time_ms: u64,
    /// Time the operator waits before moving the empty elevator.
    pub elevator_time_ms: u64,
    /// Time an engine spends between collecting and delivering.
    pub engine_time_ms: u64,
    pub max_arrival_pause_ms: u64,
    pub max_departure_pause_ms: u64,
    pub max_operator_pause_ms: u64,
    pub max_miner_pause_ms: u64,
    /// How long shutdown waits for each task.
    pub join_timeout_ms: u64,
    /// Request channel capacity of each location actor.
    pub channel_capacity: usize,
}

impl Default for MineConfig {
    fn default() -> Self {
        Self {
            stations: 4,
            mining_time_ms: 300,
            elevator_time_ms: 50,
            engine_time_ms: 200,
            max_arrival_pause_ms: 200,
            max_departure_pause_ms: 800,
            max_operator_pause_ms: 200,
            max_miner_pause_ms: 200,
            join_timeout_ms: 2000,
            channel_capacity: 32,
        }
    }
}

/// The fixed durations of the actor loops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub mining: Duration,
    pub elevator_cycle: Duration,
    pub transit: Duration,
}

impl MineConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stations == 0 {
            return Err(ConfigError::Invalid(
                "at least one station is required".to_string(),
            ));
        }
        if self.channel_capacity == 0 {
            return Err(ConfigError::Invalid(
                "channel_capacity must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn timings(&self) -> Timings {
        Timings {
            mining: Duration::from_millis(self.mining_time_ms),
            elevator_cycle: Duration::from_millis(self.elevator_time_ms),
            transit: Duration::from_millis(self.engine_time_ms),
        }
    }

    pub fn pause_bounds(&self) -> PauseBounds {
        PauseBounds {
            max_arrival: Duration::from_millis(self.max_arrival_pause_ms),
            max_departure: Duration::from_millis(self.max_departure_pause_ms),
            max_operator: Duration::from_millis(self.max_operator_pause_ms),
            max_miner: Duration::from_millis(self.max_miner_pause_ms),
        }
    }

    pub fn join_timeout(&self) -> Duration {
        Duration::from_millis(self.join_timeout_ms)
    }
}
