// ==========================================
// Billing Hub - CSV file management API
// ==========================================
// The browser-side table editor works against these three operations:
// list the uploadable files, preview one as JSON, overwrite one from a
// submitted JSON array.
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::importer::CsvRowReader;
use std::path::{Path, PathBuf};
use tracing::info;

pub struct CsvFileApi {
    upload_dir: PathBuf,
}

impl CsvFileApi {
    pub fn new(upload_dir: PathBuf) -> Self {
        Self { upload_dir }
    }

    /// List the CSV files available for preview/import.
    pub async fn list_files(&self) -> ApiResult<Vec<String>> {
        let entries = std::fs::read_dir(&self.upload_dir)
            .map_err(|e| ApiError::InternalError(format!("failed to read upload dir: {}", e)))?;

        let mut files: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| {
                Path::new(name)
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case("csv"))
                    .unwrap_or(false)
            })
            .collect();
        files.sort();

        if files.is_empty() {
            return Err(ApiError::NotFound("no CSV files found".to_string()));
        }
        Ok(files)
    }

    /// Read a CSV file into a JSON-friendly list of row objects.
    pub async fn preview(&self, file: &str) -> ApiResult<Vec<serde_json::Value>> {
        let path = self.resolve(file)?;

        let mut rows = Vec::new();
        for row in CsvRowReader::open(&path).map_err(ApiError::from)? {
            let row = row.map_err(ApiError::from)?;
            let object: serde_json::Map<String, serde_json::Value> = row
                .into_iter()
                .map(|(k, v)| (k, serde_json::Value::String(v)))
                .collect();
            rows.push(serde_json::Value::Object(object));
        }
        Ok(rows)
    }

    /// Overwrite a CSV file from a submitted JSON array. The header row is
    /// taken from the first object's keys; every row is written with that
    /// same column set.
    pub async fn update(
        &self,
        file: &str,
        rows: &[serde_json::Map<String, serde_json::Value>],
    ) -> ApiResult<()> {
        let path = self.resolve(file)?;
        if rows.is_empty() {
            return Err(ApiError::InvalidInput("invalid data".to_string()));
        }

        let headers: Vec<&String> = rows[0].keys().collect();

        let mut writer = csv::Writer::from_path(&path)
            .map_err(|e| ApiError::InternalError(format!("failed to write file: {}", e)))?;
        writer
            .write_record(&headers)
            .map_err(|e| ApiError::InternalError(format!("failed to write file: {}", e)))?;
        for row in rows {
            let record: Vec<String> = headers
                .iter()
                .map(|h| cell_to_string(row.get(h.as_str())))
                .collect();
            writer
                .write_record(&record)
                .map_err(|e| ApiError::InternalError(format!("failed to write file: {}", e)))?;
        }
        writer
            .flush()
            .map_err(|e| ApiError::InternalError(format!("failed to write file: {}", e)))?;

        info!(file = %file, rows = rows.len(), "file overwritten from editor");
        Ok(())
    }

    /// Resolve a submitted file name inside the upload directory,
    /// rejecting anything that could escape it.
    fn resolve(&self, file: &str) -> ApiResult<PathBuf> {
        if file.is_empty() || file.contains(['/', '\\']) || file.contains("..") {
            return Err(ApiError::InvalidInput(format!("invalid file name: {}", file)));
        }
        let path = self.upload_dir.join(file);
        if !path.exists() {
            return Err(ApiError::NotFound(format!("file {} not found", file)));
        }
        Ok(path)
    }
}

fn cell_to_string(value: Option<&serde_json::Value>) -> String {
    match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
