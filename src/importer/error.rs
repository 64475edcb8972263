// ==========================================
// Billing Hub - import layer error types
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// Import layer errors.
///
/// Row-level insert failures never appear here: they are folded into
/// [`crate::domain::FileImportStats`]. These variants cover whole-file and
/// run-level failures only.
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== file-level =====
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("no import target registered for file: {0}")]
    UnknownRecordKind(String),

    #[error("file read failed: {0}")]
    FileReadError(String),

    // ===== stream-level (fatal for the file) =====
    #[error("CSV decode failed: {0}")]
    CsvDecodeError(String),

    // ===== infrastructure (fatal for the run) =====
    #[error("store unavailable: {0}")]
    Store(#[from] RepositoryError),
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvDecodeError(err.to_string())
    }
}

/// Result type alias
pub type ImportResult<T> = Result<T, ImportError>;
