// ==========================================
// Billing Hub - import API
// ==========================================
// Facade over the import orchestrator: the exact two operations the HTTP
// routes and the CLI consume, with errors folded into the API taxonomy.
// ==========================================

use crate::api::error::ApiResult;
use crate::domain::FileImportStats;
use crate::importer::ImportOrchestrator;
use crate::repository::StatementExecutor;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

pub struct ImportApi {
    orchestrator: ImportOrchestrator,
}

impl ImportApi {
    pub fn new(store: Arc<dyn StatementExecutor>, upload_dir: PathBuf) -> Self {
        Self {
            orchestrator: ImportOrchestrator::new(store, upload_dir),
        }
    }

    /// Import the three billing files in dependency order.
    ///
    /// Per-file failures are folded into the statistics; only an
    /// unavailable store surfaces as an error.
    pub async fn import_all(&self) -> ApiResult<Vec<FileImportStats>> {
        let stats = self.orchestrator.import_default().await?;
        Ok(stats)
    }

    /// Import an explicit file list, strictly in the given order.
    pub async fn import_files(&self, files: &[&str]) -> ApiResult<Vec<FileImportStats>> {
        let stats = self.orchestrator.import_all(files).await?;
        Ok(stats)
    }

    /// Import one named file. Unlike the batch entry point, file-level
    /// failures (unknown name, decode error) surface as errors here so
    /// the route layer can answer with the real cause.
    pub async fn import_one(&self, file: &str) -> ApiResult<FileImportStats> {
        info!(file = %file, "on-demand import requested");
        let stats = self.orchestrator.import_one(file).await?;
        Ok(stats)
    }
}
