use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use crate::db::{schema, Db};
use crate::error::{Result, SweepError};
use super::{DocumentId, DocumentStore};

/// Document store backed by a SQLite `documents(id, text)` table.
///
/// The corpus is only ever read: files opened with `open` use a read-only
/// connection.
pub struct SqliteDocumentStore {
    conn: Connection,
}

impl SqliteDocumentStore {
    /// Open an existing store read-only.
    pub fn open(path: &Path) -> Result<Self> {
        let db = Db::new(path);
        if !db.path().exists() {
            return Err(SweepError::FileNotFound(db.path().to_path_buf()));
        }

        let conn = db.open_read_only()?;
        if !schema::has_documents_table(&conn)? {
            return Err(SweepError::Config(format!(
                "{} has no documents table; build one with ingest-store",
                db.path().display()
            )));
        }

        Ok(Self { conn })
    }

    /// Wrap an already-open connection that has a `documents` table.
    pub fn from_connection(conn: Connection) -> Result<Self> {
        if !schema::has_documents_table(&conn)? {
            return Err(SweepError::Config("connection has no documents table".to_string()));
        }
        Ok(Self { conn })
    }
}

impl DocumentStore for SqliteDocumentStore {
    fn doc_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn get_content(&self, id: &str) -> Result<String> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT text FROM documents WHERE id = ?1")?;
        stmt.query_row(params![id], |row| row.get::<_, String>(0))
            .optional()?
            .ok_or_else(|| SweepError::DocumentNotFound(id.to_string()))
    }

    fn doc_ids(&self) -> Result<Vec<DocumentId>> {
        let mut stmt = self.conn.prepare("SELECT id FROM documents ORDER BY id")?;
        let ids = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(ids)
    }
}
