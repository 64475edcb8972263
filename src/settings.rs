// ==========================================
// Billing Hub - runtime settings
// ==========================================
// Environment-driven; every knob has a usable default so
// `cargo run` works out of the box.
// ==========================================

use std::path::PathBuf;

/// Runtime settings for the server and the import CLI.
#[derive(Debug, Clone)]
pub struct Settings {
    /// SQLite database file path
    pub db_path: String,
    /// Directory holding the uploadable CSV files
    pub upload_dir: PathBuf,
    /// Bind address for the HTTP server
    pub bind_addr: String,
}

impl Settings {
    /// Build settings from the environment.
    ///
    /// # Environment
    /// - BILLING_HUB_DB_PATH: database file (default: per-user data dir)
    /// - BILLING_HUB_UPLOAD_DIR: CSV upload directory (default: ./upload)
    /// - BILLING_HUB_BIND_ADDR: HTTP bind address (default: 127.0.0.1:3000)
    pub fn from_env() -> Self {
        let db_path = env_nonempty("BILLING_HUB_DB_PATH").unwrap_or_else(default_db_path);
        let upload_dir = env_nonempty("BILLING_HUB_UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./upload"));
        let bind_addr =
            env_nonempty("BILLING_HUB_BIND_ADDR").unwrap_or_else(|| "127.0.0.1:3000".to_string());

        Self {
            db_path,
            upload_dir,
            bind_addr,
        }
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Default database path.
///
/// Prefers the per-user data directory so a dev working tree does not
/// accumulate database files; falls back to the current directory when no
/// data dir is available (e.g. stripped-down containers).
pub fn default_db_path() -> String {
    let mut path = PathBuf::from("./billing_hub.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("billing-hub");
        std::fs::create_dir_all(&dir).ok();
        path = dir.join("billing_hub.db");
    }

    path.to_string_lossy().to_string()
}
