// ==========================================
// Billing Hub - batch importer
// ==========================================
// Drives one file end-to-end: stream rows, coerce, submit one idempotent
// insert per row, settle all submissions, fold outcomes into statistics.
// ==========================================

use crate::domain::FileImportStats;
use crate::importer::csv_reader::CsvRowReader;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::row_coercer::RecordKind;
use crate::repository::StatementExecutor;
use futures::future::join_all;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

/// Row failure messages retained verbatim per file; failures beyond this
/// are counted but not captured.
pub const MAX_CAPTURED_ERRORS: usize = 5;

/// Imports a single CSV file into its target table.
pub struct BatchImporter {
    store: Arc<dyn StatementExecutor>,
}

impl BatchImporter {
    pub fn new(store: Arc<dyn StatementExecutor>) -> Self {
        Self { store }
    }

    /// Import one file and report per-row outcomes.
    ///
    /// # Returns
    /// - `Ok(stats)` with `found: false` when the file is absent (not an
    ///   error condition);
    /// - `Ok(stats)` with per-row counts otherwise. A row's failure never
    ///   aborts or rolls back the others; a duplicate primary key is a
    ///   silent no-op, not a failure.
    /// - `Err` only for whole-file problems: unknown file name, open or
    ///   mid-stream decode failure, or an unavailable store.
    pub async fn import_file(
        &self,
        upload_dir: &Path,
        file_name: &str,
    ) -> ImportResult<FileImportStats> {
        let path = upload_dir.join(file_name);
        if !path.exists() {
            info!(file = %file_name, "file not present in upload dir, skipping");
            return Ok(FileImportStats::not_found(file_name));
        }

        let kind = RecordKind::for_file(file_name)
            .ok_or_else(|| ImportError::UnknownRecordKind(file_name.to_string()))?;

        let batch_id = Uuid::new_v4().to_string();
        let started = Instant::now();
        info!(batch_id = %batch_id, file = %file_name, table = kind.table(), "starting import");

        // Submit every row before awaiting any outcome. The futures are
        // buffered for the whole file and settled collectively below.
        let sql = kind.insert_sql();
        let mut submissions = Vec::new();
        for row in CsvRowReader::open(&path)? {
            let row = row?;
            submissions.push(self.store.execute(sql, kind.coerce(&row)));
        }

        let total_rows = submissions.len();
        let outcomes = join_all(submissions).await;

        let mut inserted = 0usize;
        let mut failed = 0usize;
        let mut errors = Vec::new();
        for outcome in outcomes {
            match outcome {
                // 0 rows changed = existing primary key, skipped on purpose
                Ok(changed) if changed > 0 => inserted += 1,
                Ok(_) => {}
                Err(e) if e.is_infrastructure() => return Err(ImportError::Store(e)),
                Err(e) => {
                    failed += 1;
                    if errors.len() < MAX_CAPTURED_ERRORS {
                        errors.push(e.to_string());
                    }
                }
            }
        }

        if failed > 0 {
            warn!(file = %file_name, failed, "some rows were not persisted");
            for message in &errors {
                warn!(file = %file_name, error = %message, "row failure");
            }
        }

        info!(
            batch_id = %batch_id,
            file = %file_name,
            rows = total_rows,
            inserted,
            failed,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "import settled"
        );

        Ok(FileImportStats {
            file: file_name.to_string(),
            found: true,
            inserted,
            failed,
            errors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::error::{RepositoryError, RepositoryResult};
    use async_trait::async_trait;
    use rusqlite::types::Value;
    use std::io::Write;
    use std::sync::Mutex;

    /// Fake store: fails any row whose first parameter is NULL, succeeds
    /// otherwise, and records every submitted parameter list.
    struct FakeStore {
        submissions: Mutex<Vec<Vec<Value>>>,
    }

    impl FakeStore {
        fn new() -> Self {
            Self {
                submissions: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl StatementExecutor for FakeStore {
        async fn execute(&self, _sql: &str, params: Vec<Value>) -> RepositoryResult<usize> {
            let first_is_null = matches!(params.first(), Some(Value::Null));
            self.submissions.lock().unwrap().push(params);
            if first_is_null {
                Err(RepositoryError::ConstraintViolation(
                    "NOT NULL constraint failed".to_string(),
                ))
            } else {
                Ok(1)
            }
        }
    }

    #[tokio::test]
    async fn test_missing_file_reports_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let importer = BatchImporter::new(Arc::new(FakeStore::new()));

        let stats = importer.import_file(dir.path(), "users.csv").await.unwrap();
        assert!(!stats.found);
        assert_eq!(stats.inserted, 0);
        assert_eq!(stats.failed, 0);
    }

    #[tokio::test]
    async fn test_unknown_file_name_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("mystery.csv"), "a,b\n1,2\n").unwrap();
        let importer = BatchImporter::new(Arc::new(FakeStore::new()));

        let result = importer.import_file(dir.path(), "mystery.csv").await;
        assert!(matches!(result, Err(ImportError::UnknownRecordKind(_))));
    }

    #[tokio::test]
    async fn test_row_failures_do_not_abort_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("users.csv")).unwrap();
        writeln!(file, "Id_user,users_name").unwrap();
        for i in 1..=10 {
            // rows 3 and 7 have no identifier and must fail at the store
            if i == 3 || i == 7 {
                writeln!(file, ",user{}", i).unwrap();
            } else {
                writeln!(file, "{},user{}", i, i).unwrap();
            }
        }

        let store = Arc::new(FakeStore::new());
        let importer = BatchImporter::new(store.clone());
        let stats = importer.import_file(dir.path(), "users.csv").await.unwrap();

        assert!(stats.found);
        assert_eq!(stats.inserted, 8);
        assert_eq!(stats.failed, 2);
        assert_eq!(stats.errors.len(), 2);
        // every row was submitted, including the failing ones
        assert_eq!(store.submissions.lock().unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_captured_errors_are_bounded() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("users.csv")).unwrap();
        writeln!(file, "Id_user,users_name").unwrap();
        for i in 1..=8 {
            writeln!(file, ",user{}", i).unwrap();
        }

        let importer = BatchImporter::new(Arc::new(FakeStore::new()));
        let stats = importer.import_file(dir.path(), "users.csv").await.unwrap();

        assert_eq!(stats.failed, 8);
        assert_eq!(stats.errors.len(), MAX_CAPTURED_ERRORS);
    }

    #[tokio::test]
    async fn test_header_only_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("users.csv"), "Id_user,users_name\n").unwrap();

        let importer = BatchImporter::new(Arc::new(FakeStore::new()));
        let stats = importer.import_file(dir.path(), "users.csv").await.unwrap();

        assert!(stats.found);
        assert_eq!(stats.inserted, 0);
        assert_eq!(stats.failed, 0);
    }

    #[tokio::test]
    async fn test_stream_decode_error_is_fatal_for_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("users.csv")).unwrap();
        writeln!(file, "Id_user,users_name").unwrap();
        writeln!(file, "1,Alice").unwrap();
        file.write_all(&[0xff, 0xfe, b'\n']).unwrap();

        let importer = BatchImporter::new(Arc::new(FakeStore::new()));
        let result = importer.import_file(dir.path(), "users.csv").await;
        assert!(matches!(result, Err(ImportError::CsvDecodeError(_))));
    }
}
