// ==========================================
// Billing Hub - API layer error types
// ==========================================
// Converts repository/import errors into the small taxonomy the route
// layer maps onto HTTP statuses.
// ==========================================

use crate::importer::ImportError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API layer errors.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("database error: {0}")]
    DatabaseError(String),

    #[error("import failed: {0}")]
    ImportError(String),

    #[error("internal error: {0}")]
    InternalError(String),
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{} with id={} does not exist", entity, id))
            }
            RepositoryError::ConstraintViolation(msg) => ApiError::InvalidInput(msg),
            other => ApiError::DatabaseError(other.to_string()),
        }
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::FileNotFound(file) => {
                ApiError::NotFound(format!("file {} not found", file))
            }
            ImportError::UnknownRecordKind(file) => {
                ApiError::InvalidInput(format!("no import target registered for file: {}", file))
            }
            ImportError::Store(e) => ApiError::DatabaseError(e.to_string()),
            other => ApiError::ImportError(other.to_string()),
        }
    }
}

/// Result type alias
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_conversion() {
        let repo_err = RepositoryError::NotFound {
            entity: "User".to_string(),
            id: "42".to_string(),
        };
        let api_err: ApiError = repo_err.into();
        match api_err {
            ApiError::NotFound(msg) => {
                assert!(msg.contains("User"));
                assert!(msg.contains("42"));
            }
            _ => panic!("Expected NotFound"),
        }
    }

    #[test]
    fn test_import_error_conversion() {
        let api_err: ApiError = ImportError::UnknownRecordKind("x.csv".to_string()).into();
        assert!(matches!(api_err, ApiError::InvalidInput(_)));

        let api_err: ApiError =
            ImportError::Store(RepositoryError::LockError("poisoned".to_string())).into();
        assert!(matches!(api_err, ApiError::DatabaseError(_)));
    }
}
