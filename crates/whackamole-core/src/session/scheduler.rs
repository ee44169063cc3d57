use std::ops::RangeInclusive;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::EngineConfig;

/// Picks where the mole goes next and how long it stays there.
///
/// Holes are drawn with replacement, so the mole may stay put.
#[derive(Debug, Clone)]
pub struct MoleScheduler<R = StdRng> {
    rng: R,
    grid_size: usize,
    delay_ms: RangeInclusive<u64>,
}

impl MoleScheduler<StdRng> {
    pub fn from_config(config: &EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(
            rng,
            config.grid_size,
            config.mole_delay_min_ms..=config.mole_delay_max_ms,
        )
    }
}

impl<R: Rng> MoleScheduler<R> {
    pub fn with_rng(rng: R, grid_size: usize, delay_ms: RangeInclusive<u64>) -> Self {
        Self {
            rng,
            grid_size,
            delay_ms,
        }
    }

    pub fn next_hole(&mut self) -> usize {
        self.rng.gen_range(0..self.grid_size)
    }

    pub fn next_delay(&mut self) -> Duration {
        Duration::from_millis(self.rng.gen_range(self.delay_ms.clone()))
    }
}
