//! Database layer for persistent storage of gift records.
//!
//! This module provides a SQLite-based storage layer: connection
//! management, schema versioning, CRUD operations and transactions.
//!
//! # Examples
//!
//! ```no_run
//! use giftlist::database::{Database, DatabaseConfig};
//! use giftlist::NewGift;
//!
//! let config = DatabaseConfig::new("/tmp/giftlist/db.sqlite");
//! let mut db = Database::open(config).unwrap();
//!
//! let gift = NewGift::new("Blender", "Kitchen", "blender.png").unwrap();
//! let id = db.with_transaction(|tx| Database::insert_gift(tx, &gift)).unwrap();
//!
//! for gift in Database::list_gifts(db.connection()).unwrap() {
//!     println!("{} {}", gift.id(), gift.name());
//! }
//! # let _ = id;
//! ```

mod config;
mod connection;
pub mod migrations;
mod operations;
mod schema;
mod transaction;

#[cfg(test)]
pub(crate) mod test_util;

pub use config::{default_data_dir, DatabaseConfig};
pub use connection::Database;

pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
