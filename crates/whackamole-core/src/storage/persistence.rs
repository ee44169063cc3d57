use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::storage::RecordId;

/// What the store did with a finished round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FinalizeOutcome {
    /// Single-user store: the best score after this round.
    HighScore { high_score: u32, is_new_best: bool },
    /// Multi-user ledger: the appended record and the owner's best so far.
    Logged {
        record_id: RecordId,
        personal_best: u32,
    },
}

/// Where a [`SessionEngine`](crate::session::SessionEngine) sends the score of
/// each round that ran to completion.
///
/// Called exactly once per expired round and never for a restarted or
/// abandoned one. Implementations must be safe to share between engines.
pub trait ScorePersistence: Send + Sync {
    fn finalize_round(&self, score: u32, completed_at: DateTime<Utc>) -> Result<FinalizeOutcome>;
}

impl<T: ScorePersistence + ?Sized> ScorePersistence for std::sync::Arc<T> {
    fn finalize_round(&self, score: u32, completed_at: DateTime<Utc>) -> Result<FinalizeOutcome> {
        (**self).finalize_round(score, completed_at)
    }
}
