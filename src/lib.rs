// ==========================================
// Billing Hub - core library
// ==========================================
// Ingests tabular billing data (users, transactions, invoices) from CSV
// files into SQLite and exposes CRUD and reporting endpoints over HTTP.
// ==========================================

// ==========================================
// Module declarations
// ==========================================

// Domain layer - entities and statistics
pub mod domain;

// Data access layer
pub mod repository;

// Import layer - the CSV-to-database pipeline
pub mod importer;

// Database infrastructure (connection setup / schema)
pub mod db;

// Logging
pub mod logging;

// Runtime settings
pub mod settings;

// API layer - business facades
pub mod api;

// Application layer - wiring and HTTP routes
pub mod app;

// ==========================================
// Re-exports
// ==========================================

pub use domain::{FileImportStats, Invoice, TransactionRecord, User};

pub use importer::{
    BatchImporter, CsvRowReader, ImportError, ImportOrchestrator, RecordKind,
    DEFAULT_IMPORT_ORDER,
};

pub use repository::{BillingStore, ReportRepository, StatementExecutor, UserRepository};

pub use api::{ApiError, CsvFileApi, ImportApi, ReportApi, UserApi};

pub use settings::Settings;

// ==========================================
// Constants
// ==========================================

// System version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// System name
pub const APP_NAME: &str = "Billing Hub";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
