use thiserror::Error;

use crate::SnackId;

/// Ungültiger Nutzerkontext: Feld außerhalb seines Wertebereichs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContextError {
    #[error("hour must be within 0..=23, got {0}")]
    HourOutOfRange(u8),
    #[error("hunger must be within 1..=5, got {0}")]
    HungerOutOfRange(u8),
    #[error("unknown {field}: '{value}'")]
    UnknownVariant { field: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog could not be read: {0}")]
    Io(#[from] std::io::Error),
    #[error("Catalog deserialization failed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Duplicate snack id {0} in catalog")]
    DuplicateId(SnackId),
}

#[derive(Debug, Error)]
pub enum ClassifierError {
    /// Das Modell-Artefakt fehlt oder ist nicht lesbar.
    #[error("model unavailable: {0}")]
    Unavailable(String),
    /// Das Artefakt ist lesbar, aber inkonsistent.
    #[error("malformed model: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("History I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("History deserialization failed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("History lock poisoned")]
    Poisoned,
}
