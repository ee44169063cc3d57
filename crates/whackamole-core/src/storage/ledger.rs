use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::storage::file::{DocumentLock, read_json, write_json_atomic};
use crate::storage::leaderboard::{aggregate_leaderboard, best_for};
use crate::storage::{FinalizeOutcome, LeaderboardEntry, ScorePersistence};

pub type OwnerId = u64;
pub type RecordId = u64;

/// A registered player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub owner_id: OwnerId,
    pub display_name: String,
    /// Opaque credential, see [`crate::account`].
    pub secret: String,
}

/// One completed round. Never modified after insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub record_id: RecordId,
    pub owner_id: OwnerId,
    pub score: u32,
    pub completed_at: DateTime<Utc>,
}

/// On-disk layout: two tables plus id counters. Ids are never reused.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct LedgerTables {
    last_owner_id: OwnerId,
    last_record_id: RecordId,
    owners: Vec<Owner>,
    score_records: Vec<ScoreRecord>,
}

impl LedgerTables {
    fn owner(&self, owner_id: OwnerId) -> Option<&Owner> {
        self.owners.iter().find(|o| o.owner_id == owner_id)
    }
}

/// Multi-user score history with owners, per-round records and a leaderboard.
///
/// `display_name` is unique, records reference an existing owner, and deleting
/// an owner deletes their records. The file may be shared by several
/// processes: every write locks the document, reloads it, stages a copy of the
/// tables and only commits it once the new document is on disk. Reads reload
/// the latest committed document.
#[derive(Debug)]
pub struct ScoreLedger {
    path: Option<PathBuf>,
    tables: Mutex<LedgerTables>,
}

impl ScoreLedger {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let tables: LedgerTables = read_json(&path)?.unwrap_or_default();
        debug!(
            "Opened ledger at {:?} ({} owners, {} records)",
            path,
            tables.owners.len(),
            tables.score_records.len()
        );
        Ok(Self {
            path: Some(path),
            tables: Mutex::new(tables),
        })
    }

    pub fn in_memory() -> Self {
        Self {
            path: None,
            tables: Mutex::new(LedgerTables::default()),
        }
    }

    pub fn create_owner(&self, display_name: &str, secret: &str) -> Result<OwnerId> {
        let owner_id = self.mutate(|tables| {
            if tables.owners.iter().any(|o| o.display_name == display_name) {
                return Err(Error::DuplicateName(display_name.to_string()));
            }
            tables.last_owner_id += 1;
            let owner_id = tables.last_owner_id;
            tables.owners.push(Owner {
                owner_id,
                display_name: display_name.to_string(),
                secret: secret.to_string(),
            });
            Ok(owner_id)
        })?;
        info!("Registered owner {} ({})", display_name, owner_id);
        Ok(owner_id)
    }

    pub fn find_owner_by_name(&self, display_name: &str) -> Option<Owner> {
        self.refreshed()
            .owners
            .iter()
            .find(|o| o.display_name == display_name)
            .cloned()
    }

    pub fn owner(&self, owner_id: OwnerId) -> Option<Owner> {
        self.refreshed().owner(owner_id).cloned()
    }

    /// Remove an owner together with all of their score records.
    pub fn delete_owner(&self, owner_id: OwnerId) -> Result<bool> {
        self.mutate(|tables| {
            let before = tables.owners.len();
            tables.owners.retain(|o| o.owner_id != owner_id);
            if tables.owners.len() == before {
                return Ok(false);
            }
            tables.score_records.retain(|r| r.owner_id != owner_id);
            Ok(true)
        })
    }

    pub fn append_score_record(
        &self,
        owner_id: OwnerId,
        score: u32,
        completed_at: DateTime<Utc>,
    ) -> Result<RecordId> {
        let record_id = self.mutate(|tables| {
            if tables.owner(owner_id).is_none() {
                return Err(Error::ForeignKeyViolation { owner_id });
            }
            tables.last_record_id += 1;
            let record_id = tables.last_record_id;
            tables.score_records.push(ScoreRecord {
                record_id,
                owner_id,
                score,
                completed_at,
            });
            Ok(record_id)
        })?;
        debug!(
            "Appended record {} for owner {}: {}",
            record_id, owner_id, score
        );
        Ok(record_id)
    }

    pub fn personal_best(&self, owner_id: OwnerId) -> Option<u32> {
        best_for(owner_id, &self.refreshed().score_records)
    }

    /// Records of one owner in insertion order.
    pub fn records_for(&self, owner_id: OwnerId) -> Vec<ScoreRecord> {
        self.refreshed()
            .score_records
            .iter()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect()
    }

    pub fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        let tables = self.refreshed();
        aggregate_leaderboard(&tables.owners, &tables.score_records)
    }

    fn mutate<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut LedgerTables) -> Result<T>,
    {
        let mut tables = self.lock();
        let _document = match &self.path {
            Some(path) => {
                let lock = DocumentLock::acquire(path)?;
                *tables = read_json(path)?.unwrap_or_default();
                Some(lock)
            }
            None => None,
        };

        let mut staged = tables.clone();
        let value = f(&mut staged)?;
        if let Some(path) = &self.path {
            write_json_atomic(path, &staged)?;
        }
        *tables = staged;
        Ok(value)
    }

    /// Tables as last committed by any process. Falls back to what this
    /// handle saw last if the file cannot be read.
    fn refreshed(&self) -> MutexGuard<'_, LedgerTables> {
        let mut tables = self.lock();
        if let Some(path) = &self.path {
            match read_json(path) {
                Ok(latest) => *tables = latest.unwrap_or_default(),
                Err(e) => warn!("Failed to reload ledger {:?}: {}", path, e),
            }
        }
        tables
    }

    fn lock(&self) -> MutexGuard<'_, LedgerTables> {
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Ledger bound to the signed-in owner, for use as an engine's persistence.
#[derive(Debug, Clone)]
pub struct LedgerPersistence {
    ledger: Arc<ScoreLedger>,
    owner_id: OwnerId,
}

impl LedgerPersistence {
    pub fn new(ledger: Arc<ScoreLedger>, owner_id: OwnerId) -> Self {
        Self { ledger, owner_id }
    }

    pub fn owner_id(&self) -> OwnerId {
        self.owner_id
    }
}

impl ScorePersistence for LedgerPersistence {
    fn finalize_round(&self, score: u32, completed_at: DateTime<Utc>) -> Result<FinalizeOutcome> {
        let record_id = self
            .ledger
            .append_score_record(self.owner_id, score, completed_at)?;
        let personal_best = self.ledger.personal_best(self.owner_id).unwrap_or(score);
        Ok(FinalizeOutcome::Logged {
            record_id,
            personal_best,
        })
    }
}
