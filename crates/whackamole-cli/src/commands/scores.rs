//! Personal best and leaderboard view.

use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use whackamole_core::export::{format_leaderboard, format_scores_header};
use whackamole_core::{Accounts, LeaderboardEntry};

use crate::config::DataStores;

#[derive(Serialize)]
struct ScoresReport<'a> {
    user: &'a str,
    personal_best: Option<u32>,
    rounds_played: usize,
    leaderboard: Vec<LeaderboardEntry>,
}

pub fn run(stores: &DataStores, user: &str, password: &str, json: bool) -> Result<()> {
    let ledger = Arc::new(stores.open_ledger()?);
    let owner = Accounts::new(Arc::clone(&ledger))
        .sign_in(user, password)
        .context("Sign in failed")?;

    let personal_best = ledger.personal_best(owner.owner_id);
    let leaderboard = ledger.leaderboard();

    if json {
        let report = ScoresReport {
            user: &owner.display_name,
            personal_best,
            rounds_played: ledger.records_for(owner.owner_id).len(),
            leaderboard,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print!("{}", format_scores_header(&owner.display_name, personal_best));
    println!();
    print!("{}", format_leaderboard(&leaderboard, Some(owner.owner_id)));
    Ok(())
}
