// ==========================================
// Billing Hub - application state
// ==========================================
// Owns the store handle and the API instances shared by every request.
// ==========================================

use crate::api::{CsvFileApi, ImportApi, ReportApi, UserApi};
use crate::repository::{BillingStore, ReportRepository, UserRepository};
use crate::settings::Settings;
use std::sync::Arc;
use tracing::info;

/// Application state.
///
/// Handed to the router as shared state; one instance per process.
pub struct AppState {
    pub settings: Settings,

    /// The store handle; kept here so shutdown can close it explicitly.
    pub store: BillingStore,

    pub import_api: Arc<ImportApi>,
    pub user_api: Arc<UserApi>,
    pub report_api: Arc<ReportApi>,
    pub csv_file_api: Arc<CsvFileApi>,
}

impl AppState {
    /// Open the store, initialize the schema and build the API instances.
    pub fn new(settings: Settings) -> anyhow::Result<Self> {
        info!(db_path = %settings.db_path, upload_dir = %settings.upload_dir.display(), "initializing application state");

        // best-effort: a missing upload dir surfaces per request, not at boot
        std::fs::create_dir_all(&settings.upload_dir).ok();

        let store = BillingStore::open(&settings.db_path)?;
        let conn = store.connection();

        let user_repo = Arc::new(UserRepository::new(conn.clone()));
        let report_repo = Arc::new(ReportRepository::new(conn));

        let import_api = Arc::new(ImportApi::new(
            Arc::new(store.clone()),
            settings.upload_dir.clone(),
        ));
        let user_api = Arc::new(UserApi::new(user_repo));
        let report_api = Arc::new(ReportApi::new(report_repo));
        let csv_file_api = Arc::new(CsvFileApi::new(settings.upload_dir.clone()));

        info!("application state ready");

        Ok(Self {
            settings,
            store,
            import_api,
            user_api,
            report_api,
            csv_file_api,
        })
    }
}
