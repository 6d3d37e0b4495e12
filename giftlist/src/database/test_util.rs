//! Shared test utilities for database unit tests.

use tempfile::tempdir;

use crate::database::{Database, DatabaseConfig};
use crate::NewGift;

/// Creates a temporary test database that will be cleaned up automatically.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("db.sqlite");
    let db = Database::open(DatabaseConfig::new(path)).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}

/// Creates a valid new gift named `name` with a matching image file name.
///
/// # Panics
///
/// Panics if `name` is empty.
#[must_use]
pub fn new_gift(name: &str) -> NewGift {
    NewGift::new(name, "Kitchen", format!("{}.png", name.to_lowercase())).unwrap()
}
