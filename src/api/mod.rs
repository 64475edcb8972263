// ==========================================
// Billing Hub - API layer
// ==========================================
// Business facades consumed by the HTTP route layer and the CLI. The
// route layer stays a thin request/response mapping over these.
// ==========================================

pub mod csv_file_api;
pub mod error;
pub mod import_api;
pub mod report_api;
pub mod user_api;

pub use csv_file_api::CsvFileApi;
pub use error::{ApiError, ApiResult};
pub use import_api::ImportApi;
pub use report_api::ReportApi;
pub use user_api::UserApi;
