//! Kern-Typen und Traits für VibeSnack.
//!
//! Das Crate enthält das Datenmodell (Snacks, Katalog, Nutzerkontext) und die
//! beiden Nahtstellen zu externen Kollaborateuren: den [`Classifier`], der
//! einen Kontext in eine Wahrscheinlichkeitsverteilung übersetzt, und den
//! [`HistoryStore`], der Annahme-Zähler pro Snack hält.

use std::collections::BTreeMap;

pub mod context;
pub mod error;
pub mod snack;

pub use context::{Activity, Diet, Mood, TimeOfDay, UserContext};
pub use error::{CatalogError, ClassifierError, ContextError, HistoryError};
pub use snack::{Catalog, PriceTier, Snack, Tag};

/// Stabile Kennung eines Snacks im Katalog.
pub type SnackId = u32;

/// Ausgabe eines Klassifikators: Snack-ID → Wahrscheinlichkeit.
pub type Distribution = BTreeMap<SnackId, f64>;

/// Annahme-Zähler eines Nutzers: Snack-ID → Anzahl.
pub type AcceptCounts = BTreeMap<SnackId, u64>;

/// Summe aller Annahmen; sättigt bei `u64::MAX` statt überzulaufen.
#[must_use]
pub fn total_accepts(counts: &AcceptCounts) -> u64 {
    counts
        .values()
        .fold(0u64, |acc, &count| acc.saturating_add(count))
}

/// Extern trainiertes Modell, das einen Kontext bewertet.
///
/// Implementierungen garantieren, dass die Summe der Wahrscheinlichkeiten
/// ungefähr 1 ergibt. Schlüssel, die im aktuellen Katalog fehlen, sind
/// erlaubt und werden beim Ranking verworfen.
pub trait Classifier {
    fn score(&self, ctx: &UserContext) -> Result<Distribution, ClassifierError>;
}

/// Persistente Annahme-Historie eines einzelnen Nutzers.
pub trait HistoryStore {
    /// Liefert alle Zähler; ohne vorherigen Zustand eine leere Map.
    fn load(&self) -> Result<AcceptCounts, HistoryError>;
    /// Erhöht den Zähler von `id` um eins und gibt den neuen Stand zurück.
    fn increment(&self, id: SnackId) -> Result<u64, HistoryError>;
}

impl<T: Classifier + ?Sized> Classifier for &T {
    fn score(&self, ctx: &UserContext) -> Result<Distribution, ClassifierError> {
        (**self).score(ctx)
    }
}

impl<T: Classifier + ?Sized> Classifier for Box<T> {
    fn score(&self, ctx: &UserContext) -> Result<Distribution, ClassifierError> {
        (**self).score(ctx)
    }
}

impl<T: HistoryStore + ?Sized> HistoryStore for &T {
    fn load(&self) -> Result<AcceptCounts, HistoryError> {
        (**self).load()
    }
    fn increment(&self, id: SnackId) -> Result<u64, HistoryError> {
        (**self).increment(id)
    }
}
