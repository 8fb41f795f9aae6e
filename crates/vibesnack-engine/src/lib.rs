#![warn(clippy::unwrap_used, clippy::expect_used)]

//! Empfehlungs-Engine für VibeSnack.
//!
//! Aus der Verteilung eines [`Classifier`](vibesnack_core::Classifier) wird
//! eine personalisierte, diät-gefilterte und deterministisch sortierte
//! Top-K-Liste:
//!
//! 1. **Boost**: Snacks aus der Annahme-Historie erhalten
//!    `min(0.1, anteil * 0.2)` auf ihre Wahrscheinlichkeit (ohne
//!    Renormalisierung).
//! 2. **Ranking**: absteigend, Gleichstände nach Katalogposition.
//! 3. **Filter**: Diät über Tag-Präsenz; unbekannte IDs werden übersprungen.
//! 4. **Top-K**: die ersten `k` verbleibenden Einträge.
//!
//! Dazu kommen der Begründungsgenerator ([`explain()`]) und zwei
//! Klassifikator-Adapter.

pub mod classifier;
pub mod error;
pub mod explain;
pub mod ranking;
pub mod recommender;

pub use classifier::{HeuristicClassifier, LinearClassifier, LinearModelArtifact};
pub use error::{RecommendError, Result};
pub use explain::{explain, personalized_message};
pub use ranking::{apply_boost, history_boost, RankedSnack, RankingEngine, ScoreEntry, MAX_BOOST};
pub use recommender::Recommender;
