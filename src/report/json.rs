use chrono::Utc;
use serde::Serialize;
use std::path::PathBuf;
use crate::error::Result;
use crate::eval::{RecallMapping, RecallPoint};
use super::Reporter;

/// Serialized recall curve
#[derive(Debug, Serialize)]
struct RecallReport<'a> {
    ranker: &'a str,
    dataset_size: usize,
    doc_count: usize,
    generated_at: String,
    points: Vec<RecallPoint>,
}

/// Writes the recall mapping as pretty JSON
pub struct JsonReporter {
    path: PathBuf,
    ranker: String,
    dataset_size: usize,
}

impl JsonReporter {
    pub fn new(path: impl Into<PathBuf>, ranker: impl Into<String>, dataset_size: usize) -> Self {
        Self {
            path: path.into(),
            ranker: ranker.into(),
            dataset_size,
        }
    }
}

impl Reporter for JsonReporter {
    fn report(&self, mapping: &RecallMapping) -> Result<()> {
        let report = RecallReport {
            ranker: &self.ranker,
            dataset_size: self.dataset_size,
            doc_count: mapping.doc_count(),
            generated_at: Utc::now().to_rfc3339(),
            points: mapping.points(),
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&report)?)?;

        log::info!("Recall mapping written to {}", self.path.display());
        Ok(())
    }

    fn name(&self) -> &str {
        "json"
    }
}
