//! Database connection management.
//!
//! This module provides the main database connection type with proper
//! initialization and PRAGMA settings for optimal `SQLite` configuration.

use rusqlite::{Connection, OpenFlags};

use crate::error::Result;

use super::config::DatabaseConfig;

/// A database connection wrapper with configuration.
///
/// # Examples
///
/// ```no_run
/// use giftlist::database::{Database, DatabaseConfig};
///
/// let config = DatabaseConfig::new("/tmp/db.sqlite");
/// let db = Database::open(config).unwrap();
/// ```
#[derive(Debug)]
pub struct Database {
    pub(super) conn: Connection,
    config: DatabaseConfig,
}

impl Database {
    /// Opens a database connection with the given configuration.
    ///
    /// This function will:
    /// - Create the parent directory if `auto_create` is enabled
    /// - Open the database with appropriate flags
    /// - Set WAL mode for concurrent access
    /// - Configure busy timeout
    /// - Initialize or verify the database schema
    ///
    /// # Errors
    ///
    /// Returns an error if the file or its parent directory cannot be
    /// created, a PRAGMA fails, or the schema version is unsupported.
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        if config.auto_create && !config.path.exists() {
            if let Some(parent) = config.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let flags = if config.auto_create {
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else {
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX
        };

        let conn = Connection::open_with_flags(&config.path, flags)?;

        // journal_mode returns a row
        let _: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        conn.execute_batch("PRAGMA synchronous = NORMAL")?;
        conn.busy_timeout(config.busy_timeout)?;

        super::migrations::check_schema_compatibility(&conn)?;

        log::debug!("opened gift database at {}", config.path.display());
        Ok(Self { conn, config })
    }

    /// Opens a private in-memory database with the current schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        super::migrations::check_schema_compatibility(&conn)?;
        Ok(Self {
            conn,
            config: DatabaseConfig::new(":memory:"),
        })
    }

    /// Returns the configuration this database was opened with.
    #[must_use]
    pub const fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Returns a reference to the underlying `SQLite` connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_database_open() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("db.sqlite");
        let db = Database::open(DatabaseConfig::new(&path)).unwrap();
        assert!(path.exists());

        let journal_mode: String = db
            .connection()
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        assert_eq!(journal_mode.to_lowercase(), "wal");
    }

    #[test]
    fn test_database_auto_create_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("database").join("db.sqlite");

        assert!(!path.parent().unwrap().exists());
        let _db = Database::open(DatabaseConfig::new(&path)).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_reopen_existing_without_auto_create() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("db.sqlite");
        Database::open(DatabaseConfig::new(&path)).unwrap();

        let mut config = DatabaseConfig::new(&path);
        config.auto_create = false;
        let db = Database::open(config).unwrap();
        db.connection()
            .execute("INSERT INTO presentes (nome) VALUES ('Kettle')", [])
            .unwrap();
        assert!(!db.config().auto_create);
    }

    #[test]
    fn test_open_missing_without_auto_create_fails() {
        let dir = tempdir().unwrap();
        let mut config = DatabaseConfig::new(dir.path().join("missing.sqlite"));
        config.auto_create = false;
        assert!(Database::open(config).is_err());
    }

    #[test]
    fn test_open_in_memory_has_schema() {
        let db = Database::open_in_memory().unwrap();
        let count: i64 = db
            .connection()
            .query_row("SELECT COUNT(*) FROM presentes", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
