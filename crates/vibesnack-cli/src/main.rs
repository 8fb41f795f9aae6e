//! CLI for VibeSnack.
//!
//! Recommends snacks for a given context, records accepted suggestions in the
//! user's history, explains picks and shows what the history currently looks
//! like. It is the operational front end for the engine crates.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use tracing::Level;
use vibesnack_core::{
    Activity, Catalog, Classifier, Diet, HistoryStore, Mood, SnackId, Tag, UserContext,
};
use vibesnack_engine::{
    history_boost, personalized_message, HeuristicClassifier, LinearClassifier, RankedSnack,
    RecommendError, Recommender,
};
use vibesnack_history::{HistorySummary, JsonFileHistory};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend snacks for the given context
    Recommend {
        #[command(flatten)]
        context: ContextArgs,

        #[command(flatten)]
        sources: Sources,

        /// Trained model artifact (JSON); the rule-based model is used when omitted
        #[arg(long, env = "VIBESNACK_MODEL")]
        model: Option<PathBuf>,

        /// Number of suggestions (default: 5)
        #[arg(short = 'k', long, default_value = "5")]
        top_k: usize,

        /// Explain every suggestion
        #[arg(long)]
        explain: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Record that a suggested snack was accepted
    Accept {
        /// Snack id
        id: SnackId,

        #[command(flatten)]
        sources: Sources,
    },
    /// Explain why a snack fits the given context
    Explain {
        /// Snack id
        id: SnackId,

        #[command(flatten)]
        context: ContextArgs,

        #[command(flatten)]
        sources: Sources,
    },
    /// Summarize the accept history
    History {
        #[command(flatten)]
        sources: Sources,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the snack catalog
    Catalog {
        /// Snack catalog (JSON); the builtin catalog is used when omitted
        #[arg(long, env = "VIBESNACK_CATALOG")]
        catalog: Option<PathBuf>,
    },
}

#[derive(Args)]
struct Sources {
    /// Snack catalog (JSON); the builtin catalog is used when omitted
    #[arg(long, env = "VIBESNACK_CATALOG")]
    catalog: Option<PathBuf>,

    /// Path to the history file
    #[arg(
        long,
        env = "VIBESNACK_HISTORY",
        default_value = "data/vibesnack.history.json"
    )]
    history: PathBuf,
}

#[derive(Args)]
struct ContextArgs {
    /// Hour of the day, 0-23 (default: current local hour)
    #[arg(long)]
    hour: Option<u8>,

    /// happy, sad, bored, stressed, energetic or lazy
    #[arg(long, default_value = "happy")]
    mood: Mood,

    /// Hunger level, 1-5
    #[arg(long, default_value = "3")]
    hunger: u8,

    /// veg or non-veg
    #[arg(long, default_value = "veg")]
    diet: Diet,

    /// studying, gaming, chilling, gym or none
    #[arg(long = "context", default_value = "none")]
    activity: Activity,
}

impl ContextArgs {
    fn to_context(&self) -> Result<UserContext> {
        let hour = self.hour.unwrap_or_else(current_hour);
        UserContext::new(hour, self.mood, self.hunger, self.diet, self.activity)
            .map_err(RecommendError::from)
            .context("Invalid context")
    }
}

#[derive(Serialize, Debug)]
struct RecommendationReport {
    ts: String,
    context: UserContext,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    recommendations: Vec<ReportEntry>,
}

#[derive(Serialize, Debug)]
struct ReportEntry {
    #[serde(flatten)]
    snack: RankedSnack,
    #[serde(skip_serializing_if = "Option::is_none")]
    explanation: Option<String>,
}

fn current_hour() -> u8 {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .hour()
}

fn iso8601_now() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "1970-01-01T00:00:00Z".to_string())
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(p) => {
            Catalog::load(p).with_context(|| format!("Failed to load catalog from {:?}", p))
        }
        None => Ok(Catalog::builtin()),
    }
}

fn load_model(path: Option<&Path>, catalog: &Catalog) -> Result<Box<dyn Classifier>> {
    match path {
        Some(p) => {
            let model = LinearClassifier::load(p).map_err(RecommendError::from)?;
            tracing::debug!(path = ?p, classes = model.classes().len(), "loaded model");
            Ok(Box::new(model))
        }
        None => Ok(Box::new(HeuristicClassifier::new(catalog.clone()))),
    }
}

fn build_report(
    recommender: &Recommender<'_, Box<dyn Classifier>, JsonFileHistory>,
    ctx: &UserContext,
    k: usize,
    explain: bool,
) -> Result<RecommendationReport> {
    let picks = recommender.recommend(ctx, k)?;
    let message = picks.first().map(|top| personalized_message(ctx, &top.name));

    let recommendations = picks
        .into_iter()
        .map(|snack| {
            let explanation = if explain {
                Some(recommender.explain(ctx, snack.id)?)
            } else {
                None
            };
            Ok(ReportEntry { snack, explanation })
        })
        .collect::<Result<Vec<_>, RecommendError>>()?;

    Ok(RecommendationReport {
        ts: iso8601_now(),
        context: *ctx,
        message,
        recommendations,
    })
}

fn print_report(report: &RecommendationReport) {
    let Some((top, alternatives)) = report.recommendations.split_first() else {
        println!("No recommendation found. Try changing your inputs!");
        return;
    };

    println!(
        "I recommend: {} ({:.2})",
        top.snack.name, top.snack.probability
    );
    println!("Tags: {}", join_tags(&top.snack.tags));
    if let Some(message) = &report.message {
        println!("{message}");
    }
    if let Some(why) = &top.explanation {
        println!("Why: {why}");
    }

    if !alternatives.is_empty() {
        println!("Alternatives:");
        for alt in alternatives {
            println!("- {} ({:.2})", alt.snack.name, alt.snack.probability);
            if let Some(why) = &alt.explanation {
                println!("  {why}");
            }
        }
    }
}

fn join_tags(tags: &[Tag]) -> String {
    tags.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_history(summary: &HistorySummary, catalog: &Catalog) {
    if summary.is_empty() {
        println!("No accepts recorded yet.");
        return;
    }
    println!("{} accepts recorded.", summary.total);
    for entry in &summary.entries {
        let name = catalog
            .get(entry.id)
            .map_or("<unknown>", |s| s.name.as_str());
        println!(
            "{:>4}  {:<20} {:>4}  {:>5.1}%  boost +{:.3}",
            entry.id,
            name,
            entry.count,
            entry.share * 100.0,
            history_boost(entry.count, summary.total)
        );
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Recommend {
            context,
            sources,
            model,
            top_k,
            explain,
            json,
        } => {
            let ctx = context.to_context()?;
            let catalog = load_catalog(sources.catalog.as_deref())?;
            let classifier = load_model(model.as_deref(), &catalog)?;
            let history = JsonFileHistory::new(&sources.history);
            let recommender = Recommender::new(&catalog, classifier, history);

            let report = build_report(&recommender, &ctx, top_k, explain)?;
            if json {
                serde_json::to_writer_pretty(std::io::stdout(), &report)?;
                println!();
            } else {
                print_report(&report);
            }
        }
        Commands::Accept { id, sources } => {
            let catalog = load_catalog(sources.catalog.as_deref())?;
            let classifier: Box<dyn Classifier> =
                Box::new(HeuristicClassifier::new(catalog.clone()));
            let recommender = Recommender::new(
                &catalog,
                classifier,
                JsonFileHistory::new(&sources.history),
            );
            let count = recommender
                .accept(id)
                .with_context(|| format!("Failed to record accept for snack {id}"))?;
            let name = recommender.snack(id)?.name.as_str();
            println!("Saved {name} to your history (accepted {count} times).");
        }
        Commands::Explain {
            id,
            context,
            sources,
        } => {
            let ctx = context.to_context()?;
            let catalog = load_catalog(sources.catalog.as_deref())?;
            let snack = catalog
                .get(id)
                .ok_or(RecommendError::UnknownSnack(id))?;
            println!("{}", vibesnack_engine::explain(&ctx, snack));
        }
        Commands::History { sources, json } => {
            let catalog = load_catalog(sources.catalog.as_deref())?;
            let history = JsonFileHistory::new(&sources.history);
            let counts = history
                .load()
                .with_context(|| format!("Failed to read history from {:?}", history.path()))?;
            let summary = HistorySummary::from_counts(&counts);
            if json {
                serde_json::to_writer_pretty(std::io::stdout(), &summary)?;
                println!();
            } else {
                print_history(&summary, &catalog);
            }
        }
        Commands::Catalog { catalog } => {
            let catalog = load_catalog(catalog.as_deref())?;
            for snack in catalog.iter() {
                println!(
                    "{:>4}  {:<20} {:<7} {:<6} {}",
                    snack.id,
                    snack.name,
                    snack.price.as_str(),
                    if snack.heavy { "heavy" } else { "light" },
                    join_tags(&snack.tags)
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vibesnack_core::Distribution;

    struct FixedClassifier(Distribution);

    impl Classifier for FixedClassifier {
        fn score(
            &self,
            _ctx: &UserContext,
        ) -> Result<Distribution, vibesnack_core::ClassifierError> {
            Ok(self.0.clone())
        }
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("vibesnack").chain(args.iter().copied()))
            .unwrap_or_else(|e| panic!("arguments should parse: {e}"))
    }

    #[test]
    fn test_context_args_defaults_and_parsing() {
        let cli = parse(&[
            "recommend",
            "--hour",
            "21",
            "--mood",
            "sad",
            "--diet",
            "non-veg",
            "--context",
            "gaming",
        ]);
        let Commands::Recommend {
            context, top_k, ..
        } = cli.command
        else {
            panic!("expected recommend");
        };
        assert_eq!(top_k, 5);
        let ctx = context.to_context().unwrap();
        assert_eq!(ctx.hour, 21);
        assert_eq!(ctx.mood, Mood::Sad);
        assert_eq!(ctx.hunger, 3);
        assert_eq!(ctx.diet, Diet::NonVeg);
        assert_eq!(ctx.activity, Activity::Gaming);
    }

    #[test]
    fn test_unknown_mood_is_rejected_by_parser() {
        let res = Cli::try_parse_from(["vibesnack", "recommend", "--mood", "hangry"]);
        assert!(res.is_err());
    }

    #[test]
    fn test_out_of_range_hour_is_invalid_context() {
        let cli = parse(&["explain", "1", "--hour", "24"]);
        let Commands::Explain { context, .. } = cli.command else {
            panic!("expected explain");
        };
        let err = context.to_context().unwrap_err();
        assert!(format!("{err:#}").contains("hour must be within 0..=23"));
    }

    #[test]
    fn test_report_json_shape() {
        let dir = std::env::temp_dir().join("vibesnack_cli_test_report");
        let _ = std::fs::remove_dir_all(&dir);
        let catalog = Catalog::builtin();
        let classifier: Box<dyn Classifier> = Box::new(FixedClassifier(
            [(1, 0.5), (2, 0.3), (4, 0.2)].into_iter().collect(),
        ));
        let recommender = Recommender::new(
            &catalog,
            classifier,
            JsonFileHistory::new(dir.join("history.json")),
        );
        let ctx = UserContext::new(15, Mood::Happy, 2, Diet::Veg, Activity::None).unwrap();

        let report = build_report(&recommender, &ctx, 2, true).unwrap();
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["context"]["context"], "none");
        let recs = value["recommendations"].as_array().unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0]["id"], 1);
        assert_eq!(recs[0]["name"], "Masala Popcorn");
        assert_eq!(recs[0]["tags"][0], "spicy");
        assert!(recs[0]["explanation"].as_str().is_some_and(|s| !s.is_empty()));
        assert!(value["message"]
            .as_str()
            .is_some_and(|m| m.contains("**Masala Popcorn**")));
    }
}
