//! Common test utilities for integration tests.
//!
//! This module provides helper functions and fixture builders for testing
//! the giftlist library.

use std::path::PathBuf;

use giftlist::database::DatabaseConfig;
use giftlist::{NewGift, Reserver, SqliteGiftStore};
use tempfile::TempDir;

/// Opens a fresh file-backed store in its own temporary directory.
///
/// The directory is removed when the returned `TempDir` is dropped, so keep
/// it alive for as long as the store is used.
#[allow(dead_code)]
pub fn create_test_store() -> (TempDir, SqliteGiftStore) {
    let temp_dir = tempfile::tempdir().unwrap();
    let store = SqliteGiftStore::open(DatabaseConfig::new(database_path(&temp_dir))).unwrap();
    (temp_dir, store)
}

/// The database path used inside a test directory.
#[allow(dead_code)]
pub fn database_path(dir: &TempDir) -> PathBuf {
    dir.path().join("db.sqlite")
}

/// A reserver with a derived, unique email address.
#[allow(dead_code)]
pub fn reserver(name: &str) -> Reserver {
    Reserver::new(name, format!("{}@example.com", name.to_lowercase())).unwrap()
}

/// Builder for creating test gifts with sensible defaults.
///
/// # Examples
///
/// ```no_run
/// # use common::GiftFixture;
/// let gift = GiftFixture::new().with_name("Blender").build();
/// ```
#[allow(dead_code)]
pub struct GiftFixture {
    name: String,
    description: String,
    image: String,
}

#[allow(dead_code)]
impl GiftFixture {
    /// Creates a new fixture builder with default values.
    ///
    /// Defaults:
    /// - name: "Teapot"
    /// - description: "Porcelain"
    /// - image: "teapot.png"
    pub fn new() -> Self {
        Self {
            name: "Teapot".into(),
            description: "Porcelain".into(),
            image: "teapot.png".into(),
        }
    }

    /// Sets the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the image reference.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Builds the gift description.
    pub fn build(self) -> NewGift {
        NewGift::new(self.name, self.description, self.image).unwrap()
    }
}

impl Default for GiftFixture {
    fn default() -> Self {
        Self::new()
    }
}
