//! Boost, Ranking, Diät-Filter und Top-K.
//!
//! Die [`RankingEngine`] ist eine reine Funktion ihrer Eingaben: Klassifikator-
//! Ausgabe, Annahme-Historie und Kontext. Die Boost-Werte werden bewusst nicht
//! renormalisiert; die Ergebnisse sind relative Scores, keine Verteilung.

use serde::{Deserialize, Serialize};
use vibesnack_core::{
    total_accepts, AcceptCounts, Catalog, Distribution, SnackId, Tag, UserContext,
};

use crate::error::{RecommendError, Result};

/// Obergrenze des Boosts pro Snack.
pub const MAX_BOOST: f64 = 0.1;
/// Faktor auf den Anteil eines Snacks an allen Annahmen.
pub const BOOST_FACTOR: f64 = 0.2;

/// Zwischenergebnis pro Snack vor dem Filtern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreEntry {
    pub id: SnackId,
    pub raw: f64,
    pub boosted: f64,
}

/// Ein Eintrag der Empfehlungsliste.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSnack {
    pub id: SnackId,
    pub name: String,
    pub tags: Vec<Tag>,
    pub probability: f64,
}

/// Boost für `count` Annahmen bei insgesamt `total` Annahmen.
///
/// Liegt immer in `[0, MAX_BOOST]`; ohne Historie ist er 0.
#[must_use]
pub fn history_boost(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let share = count as f64 / total as f64;
    (share * BOOST_FACTOR).clamp(0.0, MAX_BOOST)
}

/// Addiert den Historien-Boost auf jede Wahrscheinlichkeit.
///
/// Nur IDs, die sowohl in `scores` als auch in `history` vorkommen, erhalten
/// einen Boost. Nicht-endliche Rohwerte werden als 0 behandelt.
#[must_use]
pub fn apply_boost(scores: &Distribution, history: &AcceptCounts) -> Vec<ScoreEntry> {
    let total = total_accepts(history);
    scores
        .iter()
        .map(|(&id, &p)| {
            let raw = if p.is_finite() { p } else { 0.0 };
            let boost = history
                .get(&id)
                .map_or(0.0, |&count| history_boost(count, total));
            ScoreEntry {
                id,
                raw,
                boosted: raw + boost,
            }
        })
        .collect()
}

/// Kombiniert Klassifikator-Ausgabe, Historie und Diät zu einer Top-K-Liste.
#[derive(Debug, Clone, Copy)]
pub struct RankingEngine<'a> {
    catalog: &'a Catalog,
}

impl<'a> RankingEngine<'a> {
    #[must_use]
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Sortiert absteigend nach Boost-Wert; Gleichstände nach Katalogposition.
    ///
    /// IDs ohne Katalogeintrag landen bei Gleichstand hinten, untereinander
    /// nach ID.
    pub fn rank(&self, entries: &mut [ScoreEntry]) {
        entries.sort_by(|a, b| {
            b.boosted
                .total_cmp(&a.boosted)
                .then_with(|| self.tie_key(a.id).cmp(&self.tie_key(b.id)))
        });
    }

    fn tie_key(&self, id: SnackId) -> (usize, SnackId) {
        (self.catalog.position(id).unwrap_or(usize::MAX), id)
    }

    /// Liefert höchstens `k` diät-verträgliche Snacks in Ranking-Reihenfolge.
    ///
    /// `k == 0` und ungültige Kontexte werden vor jeder Berechnung abgelehnt.
    /// Eine leere Klassifikator-Ausgabe ergibt eine leere Liste.
    pub fn recommend(
        &self,
        ctx: &UserContext,
        scores: &Distribution,
        history: &AcceptCounts,
        k: usize,
    ) -> Result<Vec<RankedSnack>> {
        if k == 0 {
            return Err(RecommendError::InvalidArgument("k must be positive"));
        }
        ctx.validate()?;
        if scores.is_empty() {
            return Ok(Vec::new());
        }

        let mut entries = apply_boost(scores, history);
        self.rank(&mut entries);
        #[cfg(feature = "telemetry")]
        tracing::debug!(
            candidates = entries.len(),
            history_total = total_accepts(history),
            k,
            "ranked classifier output"
        );

        let mut picked = Vec::with_capacity(k.min(entries.len()));
        for entry in entries {
            let Some(snack) = self.catalog.get(entry.id) else {
                note_missing_snack(entry.id);
                continue;
            };
            if !snack.suits(ctx.diet) {
                continue;
            }
            picked.push(RankedSnack {
                id: snack.id,
                name: snack.name.clone(),
                tags: snack.tags.clone(),
                probability: entry.boosted,
            });
            if picked.len() >= k {
                break;
            }
        }
        Ok(picked)
    }
}

fn note_missing_snack(id: SnackId) {
    #[cfg(feature = "telemetry")]
    tracing::warn!(snack_id = id, "scored snack has no catalog entry, skipping");
    #[cfg(not(feature = "telemetry"))]
    let _ = id;
}
