#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # giftlist
//!
//! A library for keeping a gift registry: a list of gift records that
//! visitors reserve and that an administrator curates.
//!
//! ## Core Types
//!
//! - [`Gift`] and [`GiftId`]: Registry records and their identifiers
//! - [`ReservationState`] and [`Reserver`]: Who, if anyone, has claimed a gift
//! - [`GiftStore`]: The storage seam, with [`SqliteGiftStore`] and [`MemoryGiftStore`]
//! - [`AdminSecret`]: The shared-secret gate for administrative operations
//! - [`ImageStore`]: Uploaded image persistence
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use giftlist::{GiftStore, MemoryGiftStore, NewGift, Reserver};
//!
//! let store = MemoryGiftStore::new();
//! let gift = store.create(NewGift::new("Kettle", "Stainless steel", "kettle.png").unwrap()).unwrap();
//! assert!(!gift.is_reserved());
//!
//! let reserver = Reserver::new("Ana", "ana@example.com").unwrap();
//! let gift = store.reserve(gift.id(), reserver).unwrap();
//! assert!(gift.is_reserved());
//! ```

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod gift;
pub mod images;
pub mod logging;
pub mod store;

// Re-export key types at crate root for convenience
pub use auth::AdminSecret;
pub use config::{Config, ConfigBuilder, ServerConfig};
pub use database::{Database, DatabaseConfig};
pub use error::{Error, ErrorKind, Result};
pub use gift::{Gift, GiftEdit, GiftId, NewGift, ReservationState, Reserver, ValidationError};
pub use images::{ImageStore, StoredImage};
pub use logging::{init_logger, LogLevel, Logger};
pub use store::{GiftStore, MemoryGiftStore, SqliteGiftStore};
