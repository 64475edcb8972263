// ==========================================
// Billing Hub - CSV stream reader
// ==========================================
// Single-pass, lazy reader over a CSV file with a header row. Headers are
// trimmed before becoming keys so a sloppy " Email " header and "Email"
// address the same column. Not restartable: a second read reopens the file.
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// Lazy iterator of header-to-value mappings over one CSV file.
///
/// Existence of the file is the caller's concern ("not found" is a
/// statistics outcome, not a reader error). A decode error mid-stream
/// terminates the sequence: the error is yielded once and the iterator is
/// exhausted afterwards.
pub struct CsvRowReader {
    headers: Vec<String>,
    records: csv::StringRecordsIntoIter<File>,
    done: bool,
}

impl CsvRowReader {
    pub fn open<P: AsRef<Path>>(path: P) -> ImportResult<Self> {
        let file = File::open(path.as_ref())?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // tolerate rows with fewer/more cells
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()
            .map_err(ImportError::from)?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        Ok(Self {
            headers,
            records: reader.into_records(),
            done: false,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}

impl Iterator for CsvRowReader {
    type Item = ImportResult<HashMap<String, String>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let record = match self.records.next()? {
                Ok(record) => record,
                Err(e) => {
                    // fatal for this file, not a per-row failure
                    self.done = true;
                    return Some(Err(ImportError::from(e)));
                }
            };

            let mut row = HashMap::new();
            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = self.headers.get(col_idx) {
                    row.insert(header.clone(), value.trim().to_string());
                }
            }

            // skip fully blank rows (trailing lines in hand-edited files)
            if row.values().all(|v| v.is_empty()) {
                continue;
            }

            return Some(Ok(row));
        }
    }
}
