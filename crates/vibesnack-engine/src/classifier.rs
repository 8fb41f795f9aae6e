//! Klassifikator-Adapter.
//!
//! Zwei Implementierungen des [`Classifier`]-Traits:
//!
//! * [`HeuristicClassifier`] bewertet jeden Katalog-Snack mit festen Regeln
//!   (Stimmung, Hunger, Tageszeit, Aktivität, Diät) und wandelt die Punkte per
//!   Softmax in eine Verteilung um. Immer verfügbar und deterministisch.
//! * [`LinearClassifier`] ist ein offline trainiertes multinomiales
//!   logistisches Modell, geladen aus einem JSON-Artefakt. Es bewertet die
//!   One-Hot-Kodierung aus [`encode_features`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use vibesnack_core::{
    Activity, Catalog, Classifier, ClassifierError, Diet, Distribution, Mood, Snack, SnackId,
    Tag, TimeOfDay, UserContext,
};

/// Strafpunkte für Snacks, die der Diät widersprechen.
const DIET_PENALTY: f64 = 1000.0;
/// Temperatur der Softmax; höher = flachere Verteilung.
const SOFTMAX_TEMPERATURE: f64 = 2.0;

/// Regelbasiertes Modell über einem Katalog.
#[derive(Debug, Clone)]
pub struct HeuristicClassifier {
    catalog: Catalog,
    temperature: f64,
}

impl HeuristicClassifier {
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            temperature: SOFTMAX_TEMPERATURE,
        }
    }

    /// Setzt die Softmax-Temperatur; nicht-positive Werte fallen auf den
    /// Standard zurück.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = if temperature.is_finite() && temperature > 0.0 {
            temperature
        } else {
            SOFTMAX_TEMPERATURE
        };
        self
    }

    /// Rohe Regelpunkte eines Snacks für einen Kontext.
    #[must_use]
    pub fn points(ctx: &UserContext, snack: &Snack) -> f64 {
        let tag = |t| snack.has_tag(t);
        let mut points = 0.0;

        if ctx.diet == Diet::Veg && tag(Tag::NonVeg) {
            points -= DIET_PENALTY;
        }

        points += match ctx.mood {
            Mood::Stressed | Mood::Sad if tag(Tag::Sweet) || tag(Tag::Spicy) => 3.0,
            Mood::Energetic | Mood::Happy if tag(Tag::Healthy) => 2.0,
            Mood::Bored if tag(Tag::Spicy) || tag(Tag::Savory) => 2.0,
            _ => 0.0,
        };

        if ctx.hunger >= 4 && snack.heavy {
            points += 4.0;
        } else if ctx.hunger <= 2 && !snack.heavy {
            points += 3.0;
        }

        points += match ctx.time_of_day() {
            TimeOfDay::Morning if tag(Tag::Healthy) || tag(Tag::Sweet) => 2.0,
            TimeOfDay::Afternoon if snack.heavy => 2.0,
            TimeOfDay::Night => {
                let heavy = if snack.heavy { -2.0 } else { 0.0 };
                let spicy = if tag(Tag::Spicy) { 1.0 } else { 0.0 };
                heavy + spicy
            }
            _ => 0.0,
        };

        points += match ctx.activity {
            Activity::Gym if tag(Tag::Healthy) => 5.0,
            Activity::Studying if tag(Tag::Quick) && !snack.heavy => 3.0,
            Activity::Gaming if tag(Tag::Quick) => 3.0,
            Activity::Chilling if tag(Tag::Spicy) || tag(Tag::Sweet) => 2.0,
            _ => 0.0,
        };

        points
    }
}

impl Classifier for HeuristicClassifier {
    fn score(&self, ctx: &UserContext) -> Result<Distribution, ClassifierError> {
        if self.catalog.is_empty() {
            return Err(ClassifierError::Unavailable(
                "heuristic classifier has an empty catalog".into(),
            ));
        }
        let ids: Vec<SnackId> = self.catalog.iter().map(|s| s.id).collect();
        let logits: Vec<f64> = self
            .catalog
            .iter()
            .map(|s| Self::points(ctx, s) / self.temperature)
            .collect();
        Ok(ids.into_iter().zip(softmax(&logits)).collect())
    }
}

/// Namen der Merkmale in der Reihenfolge von [`encode_features`].
#[must_use]
pub fn feature_names() -> Vec<String> {
    let mut names = Vec::with_capacity(FEATURE_COUNT);
    names.extend(TimeOfDay::ALL.iter().map(|t| format!("time={t}")));
    names.extend(Mood::ALL.iter().map(|m| format!("mood={m}")));
    names.extend(Activity::ALL.iter().map(|a| format!("context={a}")));
    names.extend(Diet::ALL.iter().map(|d| format!("diet={d}")));
    names.push("hunger".to_string());
    names
}

/// Anzahl der Merkmale: vier Tageszeiten, sechs Stimmungen, fünf
/// Aktivitäten, zwei Diäten und Hunger als Zahl.
pub const FEATURE_COUNT: usize = 4 + 6 + 5 + 2 + 1;

/// One-Hot-Kodierung des Kontexts; Hunger wird unverändert durchgereicht.
#[must_use]
pub fn encode_features(ctx: &UserContext) -> [f64; FEATURE_COUNT] {
    let mut features = [0.0; FEATURE_COUNT];
    let mut offset = 0;
    let mut one_hot = |index: Option<usize>, width: usize| {
        if let Some(i) = index {
            features[offset + i] = 1.0;
        }
        offset += width;
    };
    let time = ctx.time_of_day();
    one_hot(
        TimeOfDay::ALL.iter().position(|&t| t == time),
        TimeOfDay::ALL.len(),
    );
    one_hot(Mood::ALL.iter().position(|&m| m == ctx.mood), Mood::ALL.len());
    one_hot(
        Activity::ALL.iter().position(|&a| a == ctx.activity),
        Activity::ALL.len(),
    );
    one_hot(Diet::ALL.iter().position(|&d| d == ctx.diet), Diet::ALL.len());
    features[FEATURE_COUNT - 1] = f64::from(ctx.hunger);
    features
}

/// Serialisierte Form des linearen Modells.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModelArtifact {
    /// Snack-IDs in der Reihenfolge der Zeilen von `weights`.
    pub classes: Vec<SnackId>,
    pub bias: Vec<f64>,
    /// Eine Zeile mit [`FEATURE_COUNT`] Gewichten pro Klasse.
    pub weights: Vec<Vec<f64>>,
}

/// Multinomiales logistisches Modell aus einem Artefakt.
#[derive(Debug, Clone)]
pub struct LinearClassifier {
    artifact: LinearModelArtifact,
}

impl LinearClassifier {
    /// Prüft die Dimensionen des Artefakts.
    pub fn from_artifact(artifact: LinearModelArtifact) -> Result<Self, ClassifierError> {
        let classes = artifact.classes.len();
        if classes == 0 {
            return Err(ClassifierError::Malformed("model has no classes".into()));
        }
        if artifact.bias.len() != classes || artifact.weights.len() != classes {
            return Err(ClassifierError::Malformed(format!(
                "expected {classes} bias values and weight rows, got {} and {}",
                artifact.bias.len(),
                artifact.weights.len()
            )));
        }
        let mut seen = BTreeSet::new();
        if let Some(dup) = artifact.classes.iter().find(|&&id| !seen.insert(id)) {
            return Err(ClassifierError::Malformed(format!(
                "class {dup} appears more than once"
            )));
        }
        if let Some(row) = artifact.weights.iter().find(|r| r.len() != FEATURE_COUNT) {
            return Err(ClassifierError::Malformed(format!(
                "weight rows need {FEATURE_COUNT} entries, got {}",
                row.len()
            )));
        }
        let finite = artifact
            .bias
            .iter()
            .chain(artifact.weights.iter().flatten())
            .all(|w| w.is_finite());
        if !finite {
            return Err(ClassifierError::Malformed(
                "model contains non-finite weights".into(),
            ));
        }
        Ok(Self { artifact })
    }

    pub fn from_json(json: &str) -> Result<Self, ClassifierError> {
        let artifact: LinearModelArtifact =
            serde_json::from_str(json).map_err(|e| ClassifierError::Malformed(e.to_string()))?;
        Self::from_artifact(artifact)
    }

    /// Lädt das Artefakt; fehlt die Datei, ist das Modell nicht verfügbar.
    pub fn load(path: &Path) -> Result<Self, ClassifierError> {
        let raw = fs::read_to_string(path).map_err(|e| {
            ClassifierError::Unavailable(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&raw)
    }

    #[must_use]
    pub fn classes(&self) -> &[SnackId] {
        &self.artifact.classes
    }
}

impl Classifier for LinearClassifier {
    fn score(&self, ctx: &UserContext) -> Result<Distribution, ClassifierError> {
        let x = encode_features(ctx);
        let logits: Vec<f64> = self
            .artifact
            .weights
            .iter()
            .zip(&self.artifact.bias)
            .map(|(row, b)| b + row.iter().zip(&x).map(|(w, v)| w * v).sum::<f64>())
            .collect();
        Ok(self
            .artifact
            .classes
            .iter()
            .copied()
            .zip(softmax(&logits))
            .collect())
    }
}

/// Numerisch stabile Softmax.
fn softmax(logits: &[f64]) -> Vec<f64> {
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|l| (l - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}
