use std::io::{self, Read};

use serde::Serialize;
use vibesnack_core::{Activity, Catalog, Diet, Mood, UserContext};
use vibesnack_engine::{explain, HeuristicClassifier, RankedSnack, Recommender};
use vibesnack_history::MemoryHistory;

#[derive(Serialize)]
struct RecommendationRecord {
    context: UserContext,
    recommendations: Vec<RankedSnack>,
    why: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;

    let ctx = if input.trim().is_empty() {
        UserContext::new(16, Mood::Bored, 3, Diet::Veg, Activity::Studying)?
    } else {
        serde_json::from_str::<UserContext>(&input)?
    };

    let catalog = Catalog::builtin();
    let recommender = Recommender::new(
        &catalog,
        HeuristicClassifier::new(catalog.clone()),
        MemoryHistory::new(),
    );
    let recommendations = recommender.recommend(&ctx, 3)?;
    let why = recommendations
        .first()
        .and_then(|top| catalog.get(top.id))
        .map(|snack| explain(&ctx, snack));

    let record = RecommendationRecord {
        context: ctx,
        recommendations,
        why,
    };

    serde_json::to_writer_pretty(io::stdout(), &record)?;
    println!();

    Ok(())
}
