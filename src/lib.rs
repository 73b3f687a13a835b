pub mod config;
pub mod error;
pub mod logging;
pub mod db;
pub mod dataset;
pub mod store;
pub mod ranker;
pub mod eval;
pub mod report;
pub mod ingest;

pub use config::{Config, RankerConfig};
pub use dataset::{read_csv, DatasetRecord};
pub use error::{Result, SweepError};
pub use eval::{instance_score, RecallMapping};
pub use ranker::{build_ranker, RankedDocument, Ranker};
pub use store::{DocumentStore, MemoryDocumentStore, SqliteDocumentStore};
