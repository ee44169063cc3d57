use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::config::store::HIGH_SCORE_KEY;
use crate::error::Result;
use crate::storage::{FinalizeOutcome, Preferences, ScorePersistence};

/// Single-user best score kept in the preferences store.
#[derive(Debug)]
pub struct HighScoreStore {
    prefs: Preferences,
}

impl HighScoreStore {
    pub fn new(prefs: Preferences) -> Self {
        Self { prefs }
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(Preferences::open(path)?))
    }

    pub fn in_memory() -> Self {
        Self::new(Preferences::in_memory())
    }

    /// Stored high score, 0 if no round was ever recorded.
    pub fn high_score(&self) -> u32 {
        self.prefs
            .get_int(HIGH_SCORE_KEY)
            .map(clamp_score)
            .unwrap_or(0)
    }

    /// Keep `value` only if it beats the stored score. Returns the stored
    /// score afterwards.
    pub fn record_if_high_score(&self, value: u32) -> Result<u32> {
        self.raise(value).map(|(stored, _)| stored)
    }

    /// Returns the stored score afterwards and the one it replaced, both read
    /// under the store lock.
    fn raise(&self, value: u32) -> Result<(u32, u32)> {
        let mut previous = 0;
        let stored = self.prefs.update_int(HIGH_SCORE_KEY, |current| {
            previous = current.map(clamp_score).unwrap_or(0);
            match current {
                Some(best) if i64::from(value) <= best => None,
                _ => Some(i64::from(value)),
            }
        })?;
        Ok((stored.map(clamp_score).unwrap_or(0), previous))
    }
}

impl ScorePersistence for HighScoreStore {
    fn finalize_round(&self, score: u32, _completed_at: DateTime<Utc>) -> Result<FinalizeOutcome> {
        let (high_score, previous) = self.raise(score)?;
        let is_new_best = score > previous;
        if is_new_best {
            info!("New high score: {} (was {})", high_score, previous);
        }
        Ok(FinalizeOutcome::HighScore {
            high_score,
            is_new_best,
        })
    }
}

fn clamp_score(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}
