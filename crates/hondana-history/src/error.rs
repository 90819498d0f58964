//! Error types for history storage

use thiserror::Error;

/// Errors from the visit log
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("History storage error: {0}")]
    Storage(String),
}

/// Result type alias for history operations
pub type HistoryResult<T> = Result<T, HistoryError>;
