//! Question/answer dataset loading.

use crate::error::{Result, SweepError};
use std::path::Path;

/// One labeled question with its reference answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetRecord {
    pub question: String,
    pub answer: String,
}

/// Read a two-column CSV dataset (question, answer).
///
/// The first row is a header and is skipped. Columns past the second are
/// ignored; a row with fewer than two columns is a `MalformedRow`.
pub fn read_csv(path: &Path) -> Result<Vec<DatasetRecord>> {
    if !path.exists() {
        return Err(SweepError::FileNotFound(path.to_path_buf()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        if row.len() < 2 {
            let line = row.position().map(|p| p.line()).unwrap_or(0);
            return Err(SweepError::MalformedRow {
                line,
                columns: row.len(),
            });
        }
        records.push(DatasetRecord {
            question: row[0].to_string(),
            answer: row[1].to_string(),
        });
    }

    log::debug!("Read {} records from {}", records.len(), path.display());
    Ok(records)
}
