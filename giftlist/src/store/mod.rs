//! The gift store: the one owner of every gift record.
//!
//! [`GiftStore`] is the handle request handlers receive. Each mutating call
//! is one check-and-update: the record is read, the transition from
//! [`crate::gift`] is applied, and the result written back, all while
//! holding the store's write lock. Concurrent callers therefore see every
//! mutation as a whole or not at all, and of two racing `reserve` calls on
//! the same open gift exactly one wins.
//!
//! Two implementations are provided:
//!
//! - [`SqliteGiftStore`]: durable, backed by a database file
//! - [`MemoryGiftStore`]: volatile, for tests and throwaway runs

mod memory;
mod sqlite;

pub use memory::MemoryGiftStore;
pub use sqlite::SqliteGiftStore;

use crate::error::Result;
use crate::gift::{Gift, GiftEdit, GiftId, NewGift, Reserver};

/// Operations on the collection of gift records.
///
/// Callers always receive owned copies of records.
pub trait GiftStore: Send + Sync {
    /// Returns every gift in insertion order.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the records cannot be read.
    fn list(&self) -> Result<Vec<Gift>>;

    /// Returns one gift.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`](crate::Error::NotFound) if no gift has `id`.
    fn get(&self, id: GiftId) -> Result<Gift>;

    /// Inserts a new open gift under a fresh id.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the insert fails.
    fn create(&self, gift: NewGift) -> Result<Gift>;

    /// Reserves an open gift for `reserver`.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`](crate::Error::NotFound) if no gift has `id`
    /// - [`Error::Conflict`](crate::Error::Conflict) if it is already reserved
    fn reserve(&self, id: GiftId, reserver: Reserver) -> Result<Gift>;

    /// Returns a reserved gift to the open state.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`](crate::Error::NotFound) if no gift has `id`
    /// - [`Error::InvalidState`](crate::Error::InvalidState) if it is not reserved
    fn release(&self, id: GiftId) -> Result<Gift>;

    /// Applies an administrative edit.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`](crate::Error::NotFound) if no gift has `id`
    /// - [`Error::Validation`](crate::Error::Validation) if the edit would
    ///   reserve an open gift without a reserver
    fn edit(&self, id: GiftId, edit: GiftEdit) -> Result<Gift>;

    /// Deletes a gift.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`](crate::Error::NotFound) if no gift has `id`.
    fn delete(&self, id: GiftId) -> Result<()>;
}

#[cfg(all(test, feature = "property-tests"))]
mod proptests;
