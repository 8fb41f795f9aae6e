use thiserror::Error;
use vibesnack_core::{ClassifierError, ContextError, HistoryError, SnackId};

#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("invalid user context: {0}")]
    InvalidContext(#[from] ContextError),
    #[error("no recommendation possible: {0}")]
    MissingModel(#[from] ClassifierError),
    #[error("unknown snack id {0}")]
    UnknownSnack(SnackId),
    #[error("history update failed: {0}")]
    History(#[from] HistoryError),
}

impl RecommendError {
    /// `true` für Eingabefehler, die der Aufrufer korrigieren muss.
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            RecommendError::InvalidArgument(_)
                | RecommendError::InvalidContext(_)
                | RecommendError::UnknownSnack(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, RecommendError>;
