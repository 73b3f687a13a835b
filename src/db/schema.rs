//! Document store schema and the full-text index layout.

use rusqlite::Connection;
use crate::error::Result;

/// `documents(id, text)` is the layout of the SQLite corpus dumps the harness
/// reads; `ingest_state` is only written by the ingester.
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS documents (
    id TEXT PRIMARY KEY,
    text TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS ingest_state (
    id TEXT PRIMARY KEY,
    content_hash TEXT NOT NULL,
    ingested_at TEXT NOT NULL
);
"#;

const FTS_SQL: &str = r#"
CREATE VIRTUAL TABLE IF NOT EXISTS documents_fts USING fts5(
    id UNINDEXED,
    text,
    tokenize = 'unicode61 remove_diacritics 2'
);
"#;

/// Create the document tables if they don't exist
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// True if `conn` has a `documents` table
pub fn has_documents_table(conn: &Connection) -> Result<bool> {
    let exists = conn
        .prepare("SELECT name FROM sqlite_master WHERE type='table' AND name='documents'")?
        .exists([])?;
    Ok(exists)
}

/// Create an empty `documents_fts` index on `conn`.
pub fn create_fts_index(conn: &Connection) -> Result<()> {
    conn.execute_batch(FTS_SQL)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::params;

    #[test]
    fn test_ensure_schema_creates_tables() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        // Idempotent
        ensure_schema(&conn).unwrap();

        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get::<_, String>(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()
            .unwrap();
        assert!(tables.contains(&"documents".to_string()));
        assert!(tables.contains(&"ingest_state".to_string()));
    }

    #[test]
    fn test_has_documents_table() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(!has_documents_table(&conn).unwrap());
        ensure_schema(&conn).unwrap();
        assert!(has_documents_table(&conn).unwrap());
    }

    #[test]
    fn test_fts_index_matches_diacritics_folded() {
        let conn = Connection::open_in_memory().unwrap();
        create_fts_index(&conn).unwrap();
        create_fts_index(&conn).unwrap();
        conn.execute(
            "INSERT INTO documents_fts (id, text) VALUES (?1, ?2)",
            params!["cafe", "Caf\u{e9} au lait"],
        )
        .unwrap();

        let hits: i64 = conn
            .query_row("SELECT COUNT(*) FROM documents_fts WHERE documents_fts MATCH 'cafe'", [], |row| row.get(0))
            .unwrap();
        assert_eq!(hits, 1);
    }
}
