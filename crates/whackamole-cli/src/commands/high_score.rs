//! Single-player high score view.

use anyhow::Result;
use serde_json::json;

use crate::config::DataStores;

pub fn run(stores: &DataStores, json: bool) -> Result<()> {
    let high_score = stores.open_high_score()?.high_score();
    if json {
        println!("{}", json!({ "high_score": high_score }));
    } else {
        println!("High Score: {}", high_score);
    }
    Ok(())
}
