// ==========================================
// Billing Hub - import orchestrator
// ==========================================
// Sequences files in dependency order (parent tables first) and
// aggregates per-file statistics. Files never run in parallel with each
// other: transaction/invoice rows may reference users expected to exist.
// ==========================================

use crate::domain::FileImportStats;
use crate::importer::batch_importer::BatchImporter;
use crate::importer::error::{ImportError, ImportResult};
use crate::repository::StatementExecutor;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

/// Fixed dependency order: users before the tables referencing them.
pub const DEFAULT_IMPORT_ORDER: [&str; 3] = ["users.csv", "transaction.csv", "invoice_data.csv"];

pub struct ImportOrchestrator {
    importer: BatchImporter,
    upload_dir: PathBuf,
}

impl ImportOrchestrator {
    pub fn new(store: Arc<dyn StatementExecutor>, upload_dir: PathBuf) -> Self {
        Self {
            importer: BatchImporter::new(store),
            upload_dir,
        }
    }

    /// Import the given files strictly one after another.
    ///
    /// All rows of file N settle before file N+1 begins. A file-level
    /// failure (missing, unknown, decode error) never stops the loop; only
    /// an unavailable store aborts the whole run.
    pub async fn import_all(&self, files: &[&str]) -> ImportResult<Vec<FileImportStats>> {
        info!(count = files.len(), "starting import run");

        let mut stats = Vec::with_capacity(files.len());
        for file in files {
            match self.importer.import_file(&self.upload_dir, file).await {
                Ok(file_stats) => stats.push(file_stats),
                Err(e @ ImportError::Store(_)) => return Err(e),
                Err(e) => {
                    error!(file = %file, error = %e, "file import failed, continuing with next file");
                    stats.push(FileImportStats::stream_failed(file, e.to_string()));
                }
            }
        }

        info!(
            files = stats.len(),
            inserted = stats.iter().map(|s| s.inserted).sum::<usize>(),
            failed = stats.iter().map(|s| s.failed).sum::<usize>(),
            "import run finished"
        );
        Ok(stats)
    }

    /// Import the three billing files in their default dependency order.
    pub async fn import_default(&self) -> ImportResult<Vec<FileImportStats>> {
        self.import_all(&DEFAULT_IMPORT_ORDER).await
    }

    /// Import exactly one file, propagating file-level failures to the
    /// caller (the on-demand entry point wants the cause, not a stats
    /// placeholder).
    pub async fn import_one(&self, file: &str) -> ImportResult<FileImportStats> {
        self.importer.import_file(&self.upload_dir, file).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::error::{RepositoryError, RepositoryResult};
    use async_trait::async_trait;
    use rusqlite::types::Value;
    use std::sync::Mutex;

    /// Fake store that records the order in which tables receive rows.
    struct RecordingStore {
        tables: Mutex<Vec<String>>,
        fail_everything: bool,
    }

    impl RecordingStore {
        fn new() -> Self {
            Self {
                tables: Mutex::new(Vec::new()),
                fail_everything: false,
            }
        }

        fn unavailable() -> Self {
            Self {
                tables: Mutex::new(Vec::new()),
                fail_everything: true,
            }
        }
    }

    #[async_trait]
    impl StatementExecutor for RecordingStore {
        async fn execute(&self, sql: &str, _params: Vec<Value>) -> RepositoryResult<usize> {
            if self.fail_everything {
                return Err(RepositoryError::DatabaseConnectionError(
                    "connection pool is gone".to_string(),
                ));
            }
            let table = sql
                .split_whitespace()
                .nth(2)
                .unwrap_or_default()
                .to_string();
            self.tables.lock().unwrap().push(table);
            Ok(1)
        }
    }

    fn write_fixtures(dir: &std::path::Path) {
        std::fs::write(
            dir.join("users.csv"),
            "Id_user,users_name\n1,Alice\n2,Bob\n",
        )
        .unwrap();
        std::fs::write(
            dir.join("transaction.csv"),
            "Transaction_identification,Id_user\nTX1,1\n",
        )
        .unwrap();
        std::fs::write(
            dir.join("invoice_data.csv"),
            "invoice_id,Id_user\n10,1\n",
        )
        .unwrap();
    }

    #[tokio::test]
    async fn test_files_run_in_dependency_order() {
        let dir = tempfile::tempdir().unwrap();
        write_fixtures(dir.path());

        let store = Arc::new(RecordingStore::new());
        let orchestrator = ImportOrchestrator::new(store.clone(), dir.path().to_path_buf());

        let stats = orchestrator.import_default().await.unwrap();
        assert_eq!(stats.len(), 3);
        assert_eq!(
            *store.tables.lock().unwrap(),
            ["users", "users", "transactions", "invoices"]
        );
    }

    #[tokio::test]
    async fn test_missing_file_does_not_stop_the_run() {
        let dir = tempfile::tempdir().unwrap();
        write_fixtures(dir.path());
        std::fs::remove_file(dir.path().join("transaction.csv")).unwrap();

        let store = Arc::new(RecordingStore::new());
        let orchestrator = ImportOrchestrator::new(store.clone(), dir.path().to_path_buf());

        let stats = orchestrator.import_default().await.unwrap();
        assert_eq!(stats.len(), 3);
        assert!(stats[0].found);
        assert!(!stats[1].found);
        // the invoice file was still attempted
        assert!(stats[2].found);
        assert_eq!(stats[2].inserted, 1);
    }

    #[tokio::test]
    async fn test_decode_error_is_recovered_per_file() {
        let dir = tempfile::tempdir().unwrap();
        write_fixtures(dir.path());
        let mut corrupt = b"Transaction_identification,Id_user\n".to_vec();
        corrupt.extend_from_slice(&[0xff, 0xfe, b'\n']);
        std::fs::write(dir.path().join("transaction.csv"), corrupt).unwrap();

        let store = Arc::new(RecordingStore::new());
        let orchestrator = ImportOrchestrator::new(store, dir.path().to_path_buf());

        let stats = orchestrator.import_default().await.unwrap();
        assert_eq!(stats.len(), 3);
        assert!(stats[1].found);
        assert_eq!(stats[1].inserted, 0);
        assert!(!stats[1].errors.is_empty());
        assert_eq!(stats[2].inserted, 1);
    }

    #[tokio::test]
    async fn test_store_unavailable_aborts_the_run() {
        let dir = tempfile::tempdir().unwrap();
        write_fixtures(dir.path());

        let orchestrator = ImportOrchestrator::new(
            Arc::new(RecordingStore::unavailable()),
            dir.path().to_path_buf(),
        );

        let result = orchestrator.import_default().await;
        assert!(matches!(result, Err(ImportError::Store(_))));
    }
}
