use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the recall sweep
#[derive(Error, Debug)]
pub enum SweepError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// File system I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV decoding errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON decoding/encoding errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Remote document store download errors
    #[error("Download error: {0}")]
    Download(#[from] reqwest::Error),

    /// Input path does not exist
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Dataset row with fewer than two columns
    #[error("Malformed row at line {line}: expected at least 2 columns, found {columns}")]
    MalformedRow { line: u64, columns: usize },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Ranker failures
    #[error("Ranker error: {0}")]
    Ranker(String),

    /// Document id unknown to the store
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    /// Recall is undefined over an empty dataset
    #[error("Dataset is empty: recall would divide by zero")]
    EmptyDataset,

    /// No documents to sweep over
    #[error("Document store is empty: nothing to retrieve")]
    EmptyCorpus,

    /// Report rendering errors
    #[error("Report error: {0}")]
    Report(String),
}

/// Convenient Result type using SweepError
pub type Result<T> = std::result::Result<T, SweepError>;
