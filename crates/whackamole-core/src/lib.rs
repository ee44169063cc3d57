pub mod account;
pub mod config;
pub mod error;
pub mod export;
pub mod session;
pub mod storage;

pub use account::Accounts;
pub use config::EngineConfig;
pub use error::{AuthFailure, Error, Result};
pub use session::{MoleScheduler, Session, SessionEngine, SessionEvent, SessionPhase, TickOutcome};
pub use storage::{
    FinalizeOutcome, HighScoreStore, LeaderboardEntry, LedgerPersistence, Owner, OwnerId,
    Preferences, RecordId, ScoreLedger, ScorePersistence, ScoreRecord,
};
