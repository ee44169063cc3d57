use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::{grid, mole, round};
use crate::error::{Error, Result};

/// Tunables for a [`SessionEngine`](crate::session::SessionEngine).
///
/// Every field falls back to the shipped game value when missing from a
/// config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub round_duration_secs: u32,
    pub tick_interval_ms: u64,
    pub grid_size: usize,
    pub mole_delay_min_ms: u64,
    pub mole_delay_max_ms: u64,
    /// Fixed RNG seed for reproducible mole positions.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            round_duration_secs: round::ROUND_DURATION_SECS,
            tick_interval_ms: round::TICK_INTERVAL.as_millis() as u64,
            grid_size: grid::GRID_SIZE,
            mole_delay_min_ms: mole::MIN_DELAY_MS,
            mole_delay_max_ms: mole::MAX_DELAY_MS,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.round_duration_secs == 0 {
            return Err(Error::InvalidConfig(
                "round_duration_secs must be at least 1".to_string(),
            ));
        }
        if self.tick_interval_ms == 0 {
            return Err(Error::InvalidConfig(
                "tick_interval_ms must be at least 1".to_string(),
            ));
        }
        if self.grid_size == 0 {
            return Err(Error::InvalidConfig(
                "grid_size must be at least 1".to_string(),
            ));
        }
        if self.mole_delay_min_ms > self.mole_delay_max_ms {
            return Err(Error::InvalidConfig(format!(
                "mole delay range is empty ({}ms > {}ms)",
                self.mole_delay_min_ms, self.mole_delay_max_ms
            )));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
