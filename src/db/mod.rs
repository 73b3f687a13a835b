use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use crate::error::{Result, SweepError};

pub mod schema;

/// Database connection wrapper
pub struct Db {
    path: PathBuf,
}

impl Db {
    /// Create a new database connection manager
    pub fn new<P: AsRef<Path>>(db_path: P) -> Self {
        Self {
            path: db_path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a new database connection with read-optimized pragmas
    pub fn open_connection(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path)
            .map_err(SweepError::Database)?;

        // cache_size = -65536 (64MB cache), mmap_size = 268435456 (256MB)
        conn.execute_batch(
            "PRAGMA journal_mode = WAL; \
             PRAGMA synchronous = NORMAL; \
             PRAGMA temp_store = MEMORY; \
             PRAGMA cache_size = -65536; \
             PRAGMA mmap_size = 268435456;"
        )?;

        Ok(conn)
    }

    /// Open an existing database for reading only.
    ///
    /// No pragmas are set, so the file (and its journal mode) is left as is.
    pub fn open_read_only(&self) -> Result<Connection> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(&self.path, flags)
            .map_err(SweepError::Database)?;
        log::debug!("Opened {} read-only", self.path.display());
        Ok(conn)
    }

    /// Execute a closure with a fresh connection
    pub fn with_connection<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T>,
    {
        let mut conn = self.open_connection()?;
        f(&mut conn)
    }
}
