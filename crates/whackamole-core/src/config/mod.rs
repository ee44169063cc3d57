//! Game constants and engine configuration.
//!
//! The constants mirror the shipped game: a 30 second round on a 3x3 grid with
//! the mole hopping every 700-1000 ms. `EngineConfig` carries the same values
//! but can be overridden (tests run rounds in milliseconds).

mod engine;

pub use engine::*;

/// Round timing.
pub mod round {
    use std::time::Duration;

    /// Length of one round in countdown ticks.
    pub const ROUND_DURATION_SECS: u32 = 30;

    /// Wall-clock length of one countdown tick.
    pub const TICK_INTERVAL: Duration = Duration::from_secs(1);
}

/// Board layout.
pub mod grid {
    /// Number of holes on the board.
    pub const GRID_SIZE: usize = 9;

    /// Holes per row.
    pub const GRID_COLUMNS: usize = 3;

    /// Hole the mole sits in before the first round.
    pub const IDLE_HOLE: usize = GRID_SIZE / 2;
}

/// Mole movement cadence.
///
/// The delay is drawn uniformly from whole milliseconds, both bounds inclusive.
pub mod mole {
    pub const MIN_DELAY_MS: u64 = 700;
    pub const MAX_DELAY_MS: u64 = 1000;
}

/// On-disk store names.
pub mod store {
    /// Key of the single-user high score in the preferences store.
    pub const HIGH_SCORE_KEY: &str = "high_score";

    pub const PREFERENCES_FILE: &str = "preferences.json";
    pub const LEDGER_FILE: &str = "ledger.json";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_constants() {
        assert_eq!(round::ROUND_DURATION_SECS, 30);
        assert_eq!(round::TICK_INTERVAL.as_secs(), 1);
    }

    #[test]
    fn test_grid_constants() {
        assert_eq!(grid::GRID_SIZE, 9);
        assert_eq!(grid::GRID_SIZE % grid::GRID_COLUMNS, 0);
        assert_eq!(grid::IDLE_HOLE, 4);
    }

    #[test]
    fn test_mole_delay_bounds() {
        assert!(mole::MIN_DELAY_MS <= mole::MAX_DELAY_MS);
        assert_eq!(mole::MAX_DELAY_MS - mole::MIN_DELAY_MS, 300);
    }
}
