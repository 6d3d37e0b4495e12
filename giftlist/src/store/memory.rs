//! Volatile gift store kept in process memory.

use std::collections::BTreeMap;

use parking_lot::RwLock;

use crate::error::{Error, Result};
use crate::gift::{Gift, GiftEdit, GiftId, NewGift, Reserver};

use super::GiftStore;

#[derive(Debug, Default)]
struct Inner {
    last_id: i64,
    gifts: BTreeMap<GiftId, Gift>,
}

/// A [`GiftStore`] that keeps records in memory.
///
/// Readers share a read lock and always see a consistent snapshot; each
/// mutation holds the write lock for its whole check-and-update.
///
/// # Examples
///
/// ```
/// use giftlist::{GiftStore, MemoryGiftStore, NewGift};
///
/// let store = MemoryGiftStore::new();
/// store.create(NewGift::new("Blender", "Kitchen", "blender.png").unwrap()).unwrap();
/// assert_eq!(store.list().unwrap().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemoryGiftStore {
    inner: RwLock<Inner>,
}

impl MemoryGiftStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn update(&self, id: GiftId, transition: impl FnOnce(&mut Gift) -> Result<()>) -> Result<Gift> {
        let mut inner = self.inner.write();
        let stored = inner.gifts.get_mut(&id).ok_or(Error::NotFound { id })?;
        // transition on a copy so a failure leaves the record untouched
        let mut gift = stored.clone();
        transition(&mut gift)?;
        *stored = gift.clone();
        Ok(gift)
    }
}

impl GiftStore for MemoryGiftStore {
    fn list(&self) -> Result<Vec<Gift>> {
        Ok(self.inner.read().gifts.values().cloned().collect())
    }

    fn get(&self, id: GiftId) -> Result<Gift> {
        self.inner
            .read()
            .gifts
            .get(&id)
            .cloned()
            .ok_or(Error::NotFound { id })
    }

    fn create(&self, gift: NewGift) -> Result<Gift> {
        let mut inner = self.inner.write();
        inner.last_id += 1;
        let id = GiftId::try_from(inner.last_id)?;
        let gift = Gift::open(id, gift);
        inner.gifts.insert(id, gift.clone());
        log::info!("created gift {id} ({})", gift.name());
        Ok(gift)
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
        if self.inner.write().gifts.remove(&id).is_none() {
            return Err(Error::NotFound { id });
        }
        log::info!("gift {id} deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::contract;

    #[test]
    fn test_registry_scenario() {
        contract::registry_scenario(&MemoryGiftStore::new());
    }

    #[test]
    fn test_create_then_list() {
        contract::create_then_list(&MemoryGiftStore::new());
    }

    #[test]
    fn test_release_open_is_invalid_state() {
        contract::release_open_is_invalid_state(&MemoryGiftStore::new());
    }

    #[test]
    fn test_missing_ids_are_not_found() {
        contract::missing_ids_are_not_found(&MemoryGiftStore::new());
    }

    #[test]
    fn test_ids_are_never_reused() {
        contract::ids_are_never_reused(&MemoryGiftStore::new());
    }

    #[test]
    fn test_edit_policy() {
        contract::edit_policy(&MemoryGiftStore::new());
    }
}
