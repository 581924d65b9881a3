//! History storage errors

use std::path::PathBuf;

use thiserror::Error;

/// Result type for history storage
pub type HistoryResult<T> = Result<T, HistoryError>;

/// Why a history operation failed
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Reading, writing or copying a file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid history JSON
    #[error("Malformed history document: {0}")]
    Json(#[from] serde_json::Error),

    /// The file to read does not exist
    #[error("History file not found: {}", .0.display())]
    NotFound(PathBuf),
}
