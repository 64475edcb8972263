// ==========================================
// Billing Hub - data access error types
// ==========================================

use thiserror::Error;

/// Data access errors.
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== infrastructure =====
    #[error("database connection failed: {0}")]
    DatabaseConnectionError(String),

    #[error("database lock failed: {0}")]
    LockError(String),

    // ===== statement-level =====
    #[error("database query failed: {0}")]
    DatabaseQueryError(String),

    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    // ===== lookups =====
    #[error("record not found: {entity} with id={id}")]
    NotFound { entity: String, id: String },
}

impl RepositoryError {
    /// Infrastructure failures are fatal to a whole import run; everything
    /// else is recoverable per row or per request.
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            Self::DatabaseConnectionError(_) | Self::LockError(_)
        )
    }
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _)
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                RepositoryError::ConstraintViolation(err.to_string())
            }
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

/// Result type alias
pub type RepositoryResult<T> = Result<T, RepositoryError>;
