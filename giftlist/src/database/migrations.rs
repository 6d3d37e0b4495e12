//! Database schema management.
//!
//! This module handles schema initialization and version checking. A
//! database that already holds a `presentes` table but no metadata (as left
//! by earlier deployments) is adopted and stamped with the current version.

use rusqlite::Connection;

use crate::error::{Error, Result};

use super::schema::{
    CREATE_GIFTS_TABLE, CREATE_METADATA_TABLE, CURRENT_SCHEMA_VERSION, GIFTS_TABLE_EXISTS,
    INSERT_SCHEMA_VERSION, SELECT_SCHEMA_VERSION,
};

/// Initializes the database schema.
///
/// Safe to call on a database that already has the gifts table; existing
/// rows are kept.
///
/// # Errors
///
/// Returns an error if any SQL statement fails to execute.
///
/// # Examples
///
/// ```
/// use rusqlite::Connection;
/// use giftlist::database::migrations::initialize_schema;
///
/// let conn = Connection::open_in_memory().unwrap();
/// initialize_schema(&conn).unwrap();
/// ```
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    conn.execute(CREATE_METADATA_TABLE, [])?;
    conn.execute(CREATE_GIFTS_TABLE, [])?;
    conn.execute(INSERT_SCHEMA_VERSION, [CURRENT_SCHEMA_VERSION])?;
    Ok(())
}

/// Gets the current schema version from the database.
///
/// # Errors
///
/// Returns an error if the query fails for reasons other than a missing
/// metadata table or row (both of which mean version 0).
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    match conn.query_row(SELECT_SCHEMA_VERSION, [], |row| {
        let value: String = row.get(0)?;
        value
            .parse::<i32>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e)))
    }) {
        Ok(version) => Ok(version),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(rusqlite::Error::SqliteFailure(_, Some(ref message)))
            if message.contains("no such table") =>
        {
            Ok(0)
        }
        Err(e) => Err(e.into()),
    }
}

/// Returns `true` when a `presentes` table exists.
///
/// # Errors
///
/// Returns an error if `sqlite_master` cannot be queried.
pub fn has_gifts_table(conn: &Connection) -> Result<bool> {
    let count: i64 = conn.query_row(GIFTS_TABLE_EXISTS, [], |row| row.get(0))?;
    Ok(count > 0)
}

/// Checks schema compatibility and initializes if needed.
///
/// 1. Version 0 (fresh or unversioned database): create what is missing
/// 2. Any other version than [`CURRENT_SCHEMA_VERSION`]: refuse to open
///
/// # Errors
///
/// Returns [`Error::UnsupportedSchemaVersion`] for unknown versions, or a
/// database error if initialization fails.
pub fn check_schema_compatibility(conn: &Connection) -> Result<()> {
    let version = get_schema_version(conn)?;

    if version == 0 {
        if has_gifts_table(conn)? {
            log::info!("adopting existing presentes table (schema version {CURRENT_SCHEMA_VERSION})");
        }
        initialize_schema(conn)?;
    } else if version != CURRENT_SCHEMA_VERSION {
        return Err(Error::UnsupportedSchemaVersion {
            expected: CURRENT_SCHEMA_VERSION,
            found: version,
        });
    }

    Ok(())
}
