//! Durable gift store backed by `SQLite`.

use parking_lot::Mutex;

use crate::database::{Database, DatabaseConfig};
use crate::error::{Error, Result};
use crate::gift::{Gift, GiftEdit, GiftId, NewGift, Reserver};

use super::GiftStore;

/// A [`GiftStore`] persisting to a database file.
///
/// The connection sits behind a mutex, and every mutation runs inside an
/// `IMMEDIATE` transaction, so check-and-update sequences are serialised
/// both between threads sharing this handle and between separate handles
/// or processes opening the same file.
///
/// # Examples
///
/// ```no_run
/// use giftlist::database::DatabaseConfig;
/// use giftlist::{GiftStore, NewGift, Reserver, SqliteGiftStore};
///
/// let store = SqliteGiftStore::open(DatabaseConfig::new("/tmp/giftlist/db.sqlite")).unwrap();
/// let gift = store.create(NewGift::new("Blender", "Kitchen", "blender.png").unwrap()).unwrap();
/// store.reserve(gift.id(), Reserver::new("Ana", "ana@x.com").unwrap()).unwrap();
/// ```
#[derive(Debug)]
pub struct SqliteGiftStore {
    db: Mutex<Database>,
}

impl SqliteGiftStore {
    /// Opens (creating if needed) the database described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or its schema is
    /// unsupported.
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        Ok(Self::new(Database::open(config)?))
    }

    /// Opens a private in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::new(Database::open_in_memory()?))
    }

    /// Wraps an already opened database.
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self { db: Mutex::new(db) }
    }

    /// Loads `id`, applies `transition` and writes the result back, all in
    /// one transaction.
    fn update(&self, id: GiftId, transition: impl FnOnce(&mut Gift) -> Result<()>) -> Result<Gift> {
        self.db.lock().with_transaction(|tx| {
            let mut gift = Database::get_gift(tx, id)?.ok_or(Error::NotFound { id })?;
            transition(&mut gift)?;
            Database::update_gift(tx, &gift)?;
            Ok(gift)
        })
    }
}

impl GiftStore for SqliteGiftStore {
    fn list(&self) -> Result<Vec<Gift>> {
        Database::list_gifts(self.db.lock().connection())
    }

    fn get(&self, id: GiftId) -> Result<Gift> {
        Database::get_gift(self.db.lock().connection(), id)?.ok_or(Error::NotFound { id })
    }

    fn create(&self, gift: NewGift) -> Result<Gift> {
        let id = self
            .db
            .lock()
            .with_transaction(|tx| Database::insert_gift(tx, &gift))?;
        log::info!("created gift {id} ({})", gift.name());
        Ok(Gift::open(id, gift))
    }

    fn reserve(&self, id: GiftId, reserver: Reserver) -> Result<Gift> {
        let gift = self.update(id, |gift| gift.reserve(reserver))?;
        log::info!("gift {id} reserved");
        Ok(gift)
    }

    fn release(&self, id: GiftId) -> Result<Gift> {
        let gift = self.update(id, Gift::release)?;
        log::info!("gift {id} released");
        Ok(gift)
    }

    fn edit(&self, id: GiftId, edit: GiftEdit) -> Result<Gift> {
        let gift = self.update(id, |gift| gift.apply_edit(edit))?;
        log::info!("gift {id} edited");
        Ok(gift)
    }

    fn delete(&self, id: GiftId) -> Result<()> {
        let deleted = self
            .db
            .lock()
            .with_transaction(|tx| Database::delete_gift(tx, id))?;
        if !deleted {
            return Err(Error::NotFound { id });
        }
        log::info!("gift {id} deleted");
        Ok(())
    }
}
