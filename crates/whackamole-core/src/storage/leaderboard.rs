use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::storage::{Owner, OwnerId, ScoreRecord};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub owner_id: OwnerId,
    pub display_name: String,
    pub best_score: u32,
}

/// Best score per owner, highest first.
///
/// Owners without any record are left out. Equal bests keep registration
/// order (lower owner id first).
pub fn aggregate_leaderboard<'a, O, R>(owners: O, records: R) -> Vec<LeaderboardEntry>
where
    O: IntoIterator<Item = &'a Owner>,
    R: IntoIterator<Item = &'a ScoreRecord>,
{
    let mut best: BTreeMap<OwnerId, u32> = BTreeMap::new();
    for record in records {
        best.entry(record.owner_id)
            .and_modify(|current| *current = (*current).max(record.score))
            .or_insert(record.score);
    }

    let mut entries: Vec<LeaderboardEntry> = owners
        .into_iter()
        .filter_map(|owner| {
            best.get(&owner.owner_id).map(|&best_score| LeaderboardEntry {
                owner_id: owner.owner_id,
                display_name: owner.display_name.clone(),
                best_score,
            })
        })
        .collect();

    entries.sort_by(|a, b| {
        b.best_score
            .cmp(&a.best_score)
            .then(a.owner_id.cmp(&b.owner_id))
    });
    entries
}

/// Highest score among `records` belonging to `owner_id`.
pub fn best_for<'a, R>(owner_id: OwnerId, records: R) -> Option<u32>
where
    R: IntoIterator<Item = &'a ScoreRecord>,
{
    records
        .into_iter()
        .filter(|record| record.owner_id == owner_id)
        .map(|record| record.score)
        .max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn owner(id: OwnerId, name: &str) -> Owner {
        Owner {
            owner_id: id,
            display_name: name.to_string(),
            secret: String::new(),
        }
    }

    fn record(id: u64, owner_id: OwnerId, score: u32) -> ScoreRecord {
        ScoreRecord {
            record_id: id,
            owner_id,
            score,
            completed_at: Utc::now(),
        }
    }

    #[test]
    fn test_best_per_owner_descending() {
        let owners = [owner(1, "A"), owner(2, "B"), owner(3, "C")];
        let records = [record(1, 1, 10), record(2, 2, 15), record(3, 1, 20)];

        let board = aggregate_leaderboard(&owners, &records);
        let rows: Vec<(&str, u32)> = board
            .iter()
            .map(|e| (e.display_name.as_str(), e.best_score))
            .collect();
        assert_eq!(rows, vec![("A", 20), ("B", 15)]);
    }

    #[test]
    fn test_ties_keep_registration_order() {
        let owners = [owner(2, "late"), owner(1, "early")];
        let records = [record(1, 2, 9), record(2, 1, 9)];

        let board = aggregate_leaderboard(&owners, &records);
        assert_eq!(board[0].display_name, "early");
        assert_eq!(board[1].display_name, "late");
    }

    #[test]
    fn test_zero_scores_still_listed() {
        let owners = [owner(1, "A")];
        let records = [record(1, 1, 0)];
        let board = aggregate_leaderboard(&owners, &records);
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].best_score, 0);
    }

    #[test]
    fn test_empty() {
        let owners = [owner(1, "A")];
        let records: Vec<ScoreRecord> = Vec::new();
        let board = aggregate_leaderboard(&owners, &records);
        assert!(board.is_empty());
    }

    #[test]
    fn test_best_for() {
        let records = [record(1, 1, 3), record(2, 2, 30), record(3, 1, 7)];
        assert_eq!(best_for(1, &records), Some(7));
        assert_eq!(best_for(2, &records), Some(30));
        assert_eq!(best_for(3, &records), None);
    }
}
