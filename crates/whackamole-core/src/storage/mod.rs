//! Score persistence.
//!
//! Two stores sit behind the one [`ScorePersistence`] trait the engine talks to:
//! - [`HighScoreStore`] - single best score in the [`Preferences`] key-value file
//! - [`LedgerPersistence`] - per-round records in the multi-user [`ScoreLedger`]

mod file;
mod high_score;
mod leaderboard;
mod ledger;
mod persistence;
mod preferences;

pub use high_score::HighScoreStore;
pub use leaderboard::{LeaderboardEntry, aggregate_leaderboard, best_for};
pub use ledger::{LedgerPersistence, Owner, OwnerId, RecordId, ScoreLedger, ScoreRecord};
pub use persistence::{FinalizeOutcome, ScorePersistence};
pub use preferences::Preferences;
