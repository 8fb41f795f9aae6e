//! Records a handful of accepts in a throwaway history file and prints the
//! resulting summary.
//!
//! Run with: cargo run -p vibesnack-history --example history_summary

use std::error::Error;
use vibesnack_core::HistoryStore;
use vibesnack_history::{HistorySummary, JsonFileHistory};

fn main() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let store = JsonFileHistory::new(dir.path().join("history.json"));

    // Chocolate Bar three times, Samosa once, Fruit Salad twice
    for id in [2, 7, 2, 5, 2, 5] {
        store.increment(id)?;
    }

    println!("history file: {}", store.path().display());
    println!("{}", std::fs::read_to_string(store.path())?);

    let summary = HistorySummary::from_counts(&store.load()?);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    if let Some(top) = summary.favourite() {
        println!("favourite: snack {} ({:.0}% of accepts)", top.id, top.share * 100.0);
    }
    Ok(())
}
