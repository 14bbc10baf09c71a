//! Durable client storage.
//!
//! Holds what must survive a restart: the session (token + role) and the
//! basket ID. Everything else is refetched from the backend.

mod schema;
mod session;
mod settings;

pub use schema::*;

use std::path::Path;

use rusqlite::Connection;
use thiserror::Error;
use tracing::debug;

/// Storage errors.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Stored row is unreadable: {0}")]
    InvalidRow(String),

    #[error("Database schema v{found} is newer than supported v{supported}")]
    SchemaTooNew { found: u32, supported: u32 },
}

pub type DbResult<T> = Result<T, DbError>;

/// The client's SQLite file (or an in-memory stand-in).
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create the database file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        Self::from_connection(Connection::open(path)?)
    }

    /// Throwaway database, used when no path is configured and in tests.
    pub fn open_in_memory() -> DbResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> DbResult<Self> {
        let found: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
        if found > SCHEMA_VERSION {
            return Err(DbError::SchemaTooNew {
                found,
                supported: SCHEMA_VERSION,
            });
        }

        conn.execute_batch(SCHEMA)?;
        if found < SCHEMA_VERSION {
            conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
            debug!(from = found, to = SCHEMA_VERSION, "storage schema upgraded");
        }
        Ok(Self { conn })
    }

    /// Schema version recorded in the file.
    pub fn schema_version(&self) -> DbResult<u32> {
        Ok(self
            .conn
            .pragma_query_value(None, "user_version", |row| row.get(0))?)
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_names(db: &Database) -> Vec<String> {
        let mut stmt = db
            .conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table'")
            .unwrap();
        let names = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<Vec<String>, _>>()
            .unwrap();
        names
    }

    #[test]
    fn test_fresh_database_has_tables_and_version() {
        let db = Database::open_in_memory().unwrap();
        let tables = table_names(&db);

        assert!(tables.iter().any(|t| t == "session"));
        assert!(tables.iter().any(|t| t == "kv"));
        assert_eq!(db.schema_version().unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn test_reopen_file_keeps_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pawcare.db");

        {
            let db = Database::open(&path).unwrap();
            db.set_basket_id("basket-1").unwrap();
        }

        let db = Database::open(&path).unwrap();
        assert_eq!(db.basket_id().unwrap(), Some("basket-1".into()));
    }

    #[test]
    fn test_newer_schema_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("future.db");
        {
            let conn = Connection::open(&path).unwrap();
            conn.pragma_update(None, "user_version", SCHEMA_VERSION + 1)
                .unwrap();
        }

        let err = Database::open(&path).unwrap_err();
        assert!(matches!(err, DbError::SchemaTooNew { .. }));
    }
}
