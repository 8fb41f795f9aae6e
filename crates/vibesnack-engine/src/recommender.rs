use vibesnack_core::{
    AcceptCounts, Catalog, Classifier, HistoryStore, Snack, SnackId, UserContext,
};

use crate::error::{RecommendError, Result};
use crate::explain::explain;
use crate::ranking::{RankedSnack, RankingEngine};

/// Bündelt Katalog, Klassifikator und Historie zu einem Empfehlungsdienst.
///
/// Klassifikator und Historie werden injiziert; jede Implementierung der
/// Traits aus `vibesnack-core` lässt sich einsetzen.
pub struct Recommender<'a, C, H> {
    catalog: &'a Catalog,
    classifier: C,
    history: H,
}

impl<'a, C: Classifier, H: HistoryStore> Recommender<'a, C, H> {
    pub fn new(catalog: &'a Catalog, classifier: C, history: H) -> Self {
        Self {
            catalog,
            classifier,
            history,
        }
    }

    /// Bewertet den Kontext, lädt die Historie und rankt das Ergebnis.
    ///
    /// Ein Fehler des Klassifikators wird als `MissingModel` gemeldet. Ist die
    /// Historie nicht lesbar, wird ohne Personalisierung weitergerechnet.
    pub fn recommend(&self, ctx: &UserContext, k: usize) -> Result<Vec<RankedSnack>> {
        if k == 0 {
            return Err(RecommendError::InvalidArgument("k must be positive"));
        }
        ctx.validate()?;

        let scores = self.classifier.score(ctx)?;
        let history = self.load_history();
        RankingEngine::new(self.catalog).recommend(ctx, &scores, &history, k)
    }

    /// Zeichnet eine Annahme auf und liefert den neuen Zähler.
    pub fn accept(&self, id: SnackId) -> Result<u64> {
        if self.catalog.get(id).is_none() {
            return Err(RecommendError::UnknownSnack(id));
        }
        let count = self.history.increment(id)?;
        #[cfg(feature = "telemetry")]
        tracing::debug!(snack_id = id, count, "recorded accept");
        Ok(count)
    }

    /// Begründung für einen Katalog-Snack.
    pub fn explain(&self, ctx: &UserContext, id: SnackId) -> Result<String> {
        ctx.validate()?;
        let snack = self.snack(id)?;
        Ok(explain(ctx, snack))
    }

    pub fn snack(&self, id: SnackId) -> Result<&'a Snack> {
        self.catalog.get(id).ok_or(RecommendError::UnknownSnack(id))
    }

    #[must_use]
    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    fn load_history(&self) -> AcceptCounts {
        match self.history.load() {
            Ok(counts) => counts,
            Err(e) => {
                #[cfg(feature = "telemetry")]
                tracing::warn!(error = %e, "history unreadable, ranking without personalization");
                #[cfg(not(feature = "telemetry"))]
                let _ = e;
                AcceptCounts::new()
            }
        }
    }
}
