//! Build a SQLite document store from a directory of text files.

pub mod walker;
pub mod writer;

pub use walker::{discover_files, FileMetadata};
pub use writer::{compute_content_hash, document_id, ingest_files, IngestStats};
