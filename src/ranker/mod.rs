//! Rankers: question → ordered document ids.

pub mod bm25;
pub mod tfidf;

pub use bm25::Fts5Bm25Ranker;
pub use tfidf::TfidfRanker;

use crate::config::RankerConfig;
use crate::error::Result;
use crate::store::{DocumentId, DocumentStore};

/// A ranked candidate document
#[derive(Debug, Clone, PartialEq)]
pub struct RankedDocument {
    pub doc_id: DocumentId,
    pub score: f32,
}

/// Maps a question to candidate documents, best first.
pub trait Ranker {
    /// Rank documents for `query`, returning at most `depth` results.
    fn rank(&self, query: &str, depth: usize) -> Result<Vec<RankedDocument>>;

    /// Short label for logs and reports
    fn name(&self) -> &str;
}

/// Common English stop words dropped from queries (and, for TF-IDF, documents)
pub(crate) const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with",
    "by", "from", "as", "is", "are", "was", "were", "be", "been", "being", "have",
    "has", "had", "do", "does", "did", "will", "would", "should", "could", "what",
    "which", "who", "where", "when", "why", "how", "this", "that", "these", "those",
];

pub(crate) fn is_stop_word(term: &str) -> bool {
    STOP_WORDS.contains(&term)
}

/// Build the ranker described by `config` over `store`.
///
/// Both rankers index the store's current documents up front.
pub fn build_ranker(config: &RankerConfig, store: &dyn DocumentStore) -> Result<Box<dyn Ranker>> {
    let ranker: Box<dyn Ranker> = match *config {
        RankerConfig::Bm25 { min_score } => Box::new(Fts5Bm25Ranker::build(store, min_score)?),
        RankerConfig::Tfidf { sublinear_tf, stop_words } => {
            Box::new(TfidfRanker::build(store, sublinear_tf, stop_words)?)
        }
    };
    log::info!("Built {} ranker", ranker.name());
    Ok(ranker)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SqliteDocumentStore;
    use rusqlite::Connection;
    use tempfile::TempDir;

    fn sample_store() -> SqliteDocumentStore {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE documents (id TEXT PRIMARY KEY, text TEXT NOT NULL);
             INSERT INTO documents VALUES ('rust', 'Rust is a systems programming language');
             INSERT INTO documents VALUES ('sqlite', 'SQLite is an embedded database engine');",
        )
        .unwrap();
        SqliteDocumentStore::from_connection(conn).unwrap()
    }

    #[test]
    fn test_build_each_ranker_kind() {
        let store = sample_store();
        for config in [
            RankerConfig::Bm25 { min_score: 0.0 },
            RankerConfig::Tfidf { sublinear_tf: true, stop_words: true },
        ] {
            let ranker = build_ranker(&config, &store).unwrap();
            assert_eq!(ranker.name(), config.kind());
            let results = ranker.rank("embedded database", 1).unwrap();
            assert_eq!(results.len(), 1, "{} should honor depth", config.kind());
            assert_eq!(results[0].doc_id, "sqlite");
        }
    }

    #[test]
    fn test_stop_words() {
        assert!(is_stop_word("the"));
        assert!(!is_stop_word("paris"));
    }

    #[test]
    fn test_bm25_follows_replaced_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("corpus.db");
        let writer = Connection::open(&path).unwrap();
        writer
            .execute_batch(
                "CREATE TABLE documents (id TEXT PRIMARY KEY, text TEXT NOT NULL);
                 INSERT INTO documents VALUES ('old', 'A quadcopter has four rotors.');
                 INSERT INTO documents VALUES ('other', 'Batteries limit flight time.');",
            )
            .unwrap();

        let config = RankerConfig::Bm25 { min_score: 0.0 };
        {
            let store = SqliteDocumentStore::open(&path).unwrap();
            let ranker = build_ranker(&config, &store).unwrap();
            assert_eq!(ranker.rank("how many rotors", 2).unwrap()[0].doc_id, "old");
        }

        // Same document count, different content
        writer
            .execute_batch(
                "DELETE FROM documents WHERE id = 'old';
                 INSERT INTO documents VALUES ('new', 'A hexacopter has six rotors.');",
            )
            .unwrap();

        let store = SqliteDocumentStore::open(&path).unwrap();
        assert_eq!(store.doc_count().unwrap(), 2);
        let ranker = build_ranker(&config, &store).unwrap();
        let ids: Vec<String> = ranker
            .rank("how many rotors", 2)
            .unwrap()
            .into_iter()
            .map(|r| r.doc_id)
            .collect();
        assert_eq!(ids, vec!["new".to_string()]);
        assert!(store.get_content(&ids[0]).unwrap().contains("six rotors"));
    }
}
