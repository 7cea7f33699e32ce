// config.rs - Engine settings, optionally read from a TOML file

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{LifeError, Result};

pub const DEFAULT_GRID_SIZE: usize = 60;
pub const DEFAULT_FREQUENCY: f64 = 10.0;

/// Settings consumed when a [`SimulationEngine`](crate::SimulationEngine) is built.
///
/// Missing fields fall back to the defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Cells per side of the square grid.
    pub grid_size: usize,

    /// Generations per second while running.
    pub frequency: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            frequency: DEFAULT_FREQUENCY,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.grid_size == 0 {
            return Err(LifeError::InvalidSize(self.grid_size));
        }
        if !self.frequency.is_finite() || self.frequency <= 0.0 {
            return Err(LifeError::InvalidFrequency(self.frequency));
        }
        Ok(())
    }

    /// Wait between two generations, `1 / frequency` seconds.
    ///
    /// Frequencies so small that the wait does not fit a `Duration` are rejected.
    pub fn tick_interval(&self) -> Result<Duration> {
        self.validate()?;
        Duration::try_from_secs_f64(self.frequency.recip())
            .map_err(|_| LifeError::InvalidFrequency(self.frequency))
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `EngineConfig::default()`.
pub fn load_config(path: &Path) -> Result<EngineConfig> {
    if !path.exists() {
        let cfg = EngineConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).map_err(|source| LifeError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    let cfg: EngineConfig = toml::from_str(&contents).map_err(|source| LifeError::ParseConfig {
        path: path.to_path_buf(),
        source,
    })?;
    cfg.validate()?;
    Ok(cfg)
}
