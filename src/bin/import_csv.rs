// Direct-invocation import: run the three billing files through the
// orchestrator and print the per-file statistics.
//
// Usage:
//   cargo run --bin import_csv -- [db_path] [upload_dir]
//
// Exits 0 when the run completes (individual row failures included);
// exits 1 only when the orchestrator itself fails (store unavailable).

use billing_hub::repository::BillingStore;
use billing_hub::settings::Settings;
use billing_hub::{logging, ImportApi};
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    logging::init();

    let defaults = Settings::from_env();
    let mut args = std::env::args().skip(1);
    let db_path = args.next().unwrap_or(defaults.db_path);
    let upload_dir = args.next().map(PathBuf::from).unwrap_or(defaults.upload_dir);

    let store = match BillingStore::open(&db_path) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("failed to open store {}: {}", db_path, e);
            std::process::exit(1);
        }
    };

    let import_api = ImportApi::new(Arc::new(store.clone()), upload_dir);
    let result = import_api.import_all().await;

    // always release the store, success or failure
    if let Err(e) = store.close() {
        tracing::warn!(error = %e, "failed to close store cleanly");
    }

    match result {
        Ok(stats) => {
            println!(
                "{}",
                serde_json::to_string_pretty(&stats).unwrap_or_else(|_| format!("{:?}", stats))
            );
        }
        Err(e) => {
            eprintln!("import failed: {}", e);
            std::process::exit(1);
        }
    }
}
