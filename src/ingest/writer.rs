use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use sha2::{Digest, Sha256};
use crate::db::schema;
use crate::error::Result;
use super::FileMetadata;

/// Counts from one ingestion run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestStats {
    pub inserted: usize,
    pub updated: usize,
    pub unchanged: usize,
}

/// SHA256 of the document text, hex-encoded
pub fn compute_content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Document id for a file: its relative path without the extension.
pub fn document_id(relative_path: &str) -> String {
    match relative_path.rfind('.') {
        Some(dot) if dot > relative_path.rfind('/').map(|s| s + 1).unwrap_or(0) => {
            relative_path[..dot].to_string()
        }
        _ => relative_path.to_string(),
    }
}

/// Insert or update every file as a document. Unchanged files (same content
/// hash) are skipped unless `force` is set.
pub fn ingest_files(conn: &mut Connection, files: &[FileMetadata], force: bool) -> Result<IngestStats> {
    schema::ensure_schema(conn)?;

    let mut stats = IngestStats::default();
    let tx = conn.transaction()?;
    {
        let mut lookup = tx.prepare("SELECT content_hash FROM ingest_state WHERE id = ?1")?;
        let mut upsert_doc = tx.prepare(
            "INSERT INTO documents (id, text) VALUES (?1, ?2)
             ON CONFLICT(id) DO UPDATE SET text = excluded.text",
        )?;
        let mut upsert_state = tx.prepare(
            "INSERT INTO ingest_state (id, content_hash, ingested_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET content_hash = excluded.content_hash,
                                           ingested_at = excluded.ingested_at",
        )?;

        for (idx, file) in files.iter().enumerate() {
            let content = std::fs::read_to_string(&file.absolute_path)?;
            let id = document_id(&file.relative_path);
            let hash = compute_content_hash(&content);

            let stored: Option<String> = lookup
                .query_row(params![id], |row| row.get(0))
                .optional()?;

            match stored {
                Some(ref h) if *h == hash && !force => {
                    stats.unchanged += 1;
                    continue;
                }
                Some(_) => stats.updated += 1,
                None => stats.inserted += 1,
            }

            log::debug!("[{}/{}] Ingesting {} as {:?}", idx + 1, files.len(), file.relative_path, id);
            upsert_doc.execute(params![id, content])?;
            upsert_state.execute(params![id, hash, Utc::now().to_rfc3339()])?;
        }
    }
    tx.commit()?;

    log::info!(
        "Ingestion complete: inserted={}, updated={}, unchanged={}",
        stats.inserted,
        stats.updated,
        stats.unchanged
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::discover_files;
    use crate::store::{DocumentStore, SqliteDocumentStore};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_document_id() {
        assert_eq!(document_id("wiki/drones/quadcopter.txt"), "wiki/drones/quadcopter");
        assert_eq!(document_id("README.md"), "README");
        assert_eq!(document_id("v1.2/notes"), "v1.2/notes");
        assert_eq!(document_id(".hidden"), ".hidden");
    }

    #[test]
    fn test_content_hash_stable() {
        assert_eq!(compute_content_hash("abc"), compute_content_hash("abc"));
        assert_ne!(compute_content_hash("abc"), compute_content_hash("abd"));
        assert_eq!(compute_content_hash("").len(), 64);
    }

    #[test]
    fn test_ingest_then_open_store() {
        let temp_dir = TempDir::new().unwrap();
        let corpus = temp_dir.path().join("corpus");
        fs::create_dir_all(corpus.join("wiki")).unwrap();
        fs::write(corpus.join("wiki/paris.txt"), "Paris is the capital of France.").unwrap();
        fs::write(corpus.join("berlin.md"), "Berlin is the capital of Germany.").unwrap();

        let db_path = temp_dir.path().join("docs.db");
        let files = discover_files(&corpus).unwrap();
        let mut conn = Connection::open(&db_path).unwrap();

        let stats = ingest_files(&mut conn, &files, false).unwrap();
        assert_eq!(stats, IngestStats { inserted: 2, updated: 0, unchanged: 0 });

        // Second run skips everything
        let stats = ingest_files(&mut conn, &files, false).unwrap();
        assert_eq!(stats, IngestStats { inserted: 0, updated: 0, unchanged: 2 });

        // Modified content is updated; force re-ingests the rest
        fs::write(corpus.join("berlin.md"), "Berlin, Germany.").unwrap();
        let stats = ingest_files(&mut conn, &files, true).unwrap();
        assert_eq!(stats, IngestStats { inserted: 0, updated: 2, unchanged: 0 });
        drop(conn);

        let store = SqliteDocumentStore::open(&db_path).unwrap();
        assert_eq!(store.doc_count().unwrap(), 2);
        assert_eq!(store.get_content("berlin").unwrap(), "Berlin, Germany.");
        assert_eq!(store.get_content("wiki/paris").unwrap(), "Paris is the capital of France.");
    }
}
