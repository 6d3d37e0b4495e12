//! Transaction management utilities.
//!
//! Every mutation of a gift is a read-check-write sequence. Running it
//! inside an `IMMEDIATE` transaction takes SQLite's write lock before the
//! read, so two writers can never both observe the same pre-state, whether
//! they share a process or not.

use rusqlite::{Transaction, TransactionBehavior};

use crate::error::{Error, Result};

use super::connection::Database;

impl Database {
    /// Begins an `IMMEDIATE` transaction.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockTimeout`] if another writer holds the lock for
    /// longer than the busy timeout, or a database error.
    pub fn begin_transaction(&mut self) -> Result<Transaction<'_>> {
        let millis = self.config().busy_timeout_ms();
        self.conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| Error::from_sqlite(e, millis))
    }

    /// Runs `f` inside an `IMMEDIATE` transaction.
    ///
    /// The transaction commits when `f` returns `Ok` and rolls back when it
    /// returns `Err`.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `f`, or a lock timeout / database error
    /// from beginning or committing the transaction.
    ///
    /// # Examples
    ///
    /// ```
    /// use giftlist::database::Database;
    /// use giftlist::NewGift;
    ///
    /// let mut db = Database::open_in_memory().unwrap();
    /// let id = db
    ///     .with_transaction(|tx| Database::insert_gift(tx, &NewGift::new("Lamp", "Desk", "l.png")?))
    ///     .unwrap();
    /// assert_eq!(id.value(), 1);
    /// ```
    pub fn with_transaction<T>(
        &mut self,
        f: impl FnOnce(&Transaction<'_>) -> Result<T>,
    ) -> Result<T> {
        let millis = self.config().busy_timeout_ms();
        let tx = self.begin_transaction()?;
        let value = f(&tx)?;
        tx.commit().map_err(|e| Error::from_sqlite(e, millis))?;
        Ok(value)
    }
}
