// ==========================================
// Billing Hub - import statistics
// ==========================================

use serde::{Deserialize, Serialize};

/// Outcome of importing one CSV file.
///
/// Consumed verbatim by the HTTP layer and the CLI. `errors` holds up to
/// the first [`crate::importer::MAX_CAPTURED_ERRORS`] row failure messages;
/// failures beyond that are counted but not captured.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileImportStats {
    pub file: String,
    pub found: bool,
    pub inserted: usize,
    pub failed: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl FileImportStats {
    /// Stats for a file that does not exist in the upload directory.
    /// Not an error condition: the orchestrator keeps going.
    pub fn not_found(file: &str) -> Self {
        Self {
            file: file.to_string(),
            found: false,
            inserted: 0,
            failed: 0,
            errors: Vec::new(),
        }
    }

    /// Stats for a file whose stream failed before any row settled
    /// (decode error mid-file). The fatal message is retained so batch
    /// callers can still see why the file produced nothing.
    pub fn stream_failed(file: &str, message: String) -> Self {
        Self {
            file: file.to_string(),
            found: true,
            inserted: 0,
            failed: 0,
            errors: vec![message],
        }
    }
}
