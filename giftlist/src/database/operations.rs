//! Database CRUD operations for gift records.
//!
//! These functions take a plain [`Connection`] so they can run either on
//! their own or inside a transaction from
//! [`Database::with_transaction`](super::Database::with_transaction).

use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::Result;
use crate::gift::{Gift, GiftId, NewGift, ReservationState, Reserver};

use super::connection::Database;
use super::schema::{DELETE_GIFT, GIFT_COLUMNS, INSERT_GIFT, UPDATE_GIFT};

fn conversion_error(index: usize, err: impl std::error::Error + Send + Sync + 'static) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(index, rusqlite::types::Type::Integer, Box::new(err))
}

/// Reads a column as text whatever its storage class; NULL is `None`.
fn text_column(row: &rusqlite::Row<'_>, index: usize) -> rusqlite::Result<Option<String>> {
    Ok(match row.get_ref(index)? {
        ValueRef::Null => None,
        ValueRef::Integer(n) => Some(n.to_string()),
        ValueRef::Real(x) => Some(x.to_string()),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            Some(String::from_utf8_lossy(bytes).into_owned())
        }
    })
}

/// Reads the `reservado` flag. Anything other than NULL, zero, an empty
/// string or `false` counts as set.
fn flag_column(row: &rusqlite::Row<'_>, index: usize) -> rusqlite::Result<bool> {
    Ok(match row.get_ref(index)? {
        ValueRef::Null => false,
        ValueRef::Integer(n) => n != 0,
        ValueRef::Real(x) => x != 0.0,
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            let text = String::from_utf8_lossy(bytes);
            let text = text.trim();
            !(text.is_empty()
                || text.eq_ignore_ascii_case("false")
                || text.parse::<f64>().is_ok_and(|x| x == 0.0))
        }
    })
}

/// Name shown for a stored row whose name is missing.
fn placeholder_name(id: GiftId) -> String {
    format!("Presente {id}")
}

/// Decodes a row selected with [`GIFT_COLUMNS`].
///
/// Rows written by earlier deployments may break the record invariants.
/// They are normalised and a warning is logged: a row flagged `reservado`
/// without both reserver columns is read as open, and a missing name is
/// replaced by a placeholder.
fn row_to_gift(row: &rusqlite::Row<'_>) -> rusqlite::Result<Gift> {
    let id: i64 = row.get(0)?;
    let name = text_column(row, 1)?;
    let description = text_column(row, 2)?;
    let image = text_column(row, 3)?;
    let reserved = flag_column(row, 4)?;
    let reserver_name = text_column(row, 5)?;
    let reserver_email = text_column(row, 6)?;

    let id = GiftId::try_from(id).map_err(|e| conversion_error(0, e))?;

    let state = if reserved {
        match (reserver_name, reserver_email) {
            (Some(name), Some(email)) => match Reserver::new(name, email) {
                Ok(who) => ReservationState::Reserved(who),
                Err(e) => {
                    log::warn!("gift {id} is flagged reserved but {e}; treating as open");
                    ReservationState::Open
                }
            },
            _ => {
                log::warn!("gift {id} is flagged reserved without a reserver; treating as open");
                ReservationState::Open
            }
        }
    } else {
        ReservationState::Open
    };

    let name = match name.filter(|n| !n.trim().is_empty()) {
        Some(name) => name,
        None => {
            log::warn!("gift {id} has no name; showing a placeholder");
            placeholder_name(id)
        }
    };

    Gift::builder(id, name)
        .description(description.unwrap_or_default())
        .image(image)
        .state(state)
        .build()
        .map_err(|e| conversion_error(1, e))
}

impl Database {
    /// Inserts a new open gift and returns its freshly assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_gift(conn: &Connection, gift: &NewGift) -> Result<GiftId> {
        conn.execute(
            INSERT_GIFT,
            params![gift.name(), gift.description(), gift.image()],
        )?;
        let id = GiftId::try_from(conn.last_insert_rowid())?;
        Ok(id)
    }

    /// Retrieves a gift by id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(gift))` if the gift exists
    /// - `Ok(None)` if it doesn't
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row cannot be decoded.
    pub fn get_gift(conn: &Connection, id: GiftId) -> Result<Option<Gift>> {
        let sql = format!("SELECT {GIFT_COLUMNS} FROM presentes WHERE id = ?");
        let gift = conn
            .query_row(&sql, params![id.value()], row_to_gift)
            .optional()?;
        Ok(gift)
    }

    /// Lists every gift in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or any row cannot be decoded.
    pub fn list_gifts(conn: &Connection) -> Result<Vec<Gift>> {
        let sql = format!("SELECT {GIFT_COLUMNS} FROM presentes ORDER BY id");
        let mut stmt = conn.prepare(&sql)?;
        let gifts = stmt
            .query_map([], row_to_gift)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(gifts)
    }

    /// Writes every mutable column of `gift` back to its row.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the row was found and updated
    /// - `Ok(false)` if no row has that id
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_gift(conn: &Connection, gift: &Gift) -> Result<bool> {
        let reserver = gift.reserver();
        let rows_affected = conn.execute(
            UPDATE_GIFT,
            params![
                gift.name(),
                gift.description(),
                gift.image(),
                i64::from(gift.is_reserved()),
                reserver.map(Reserver::name),
                reserver.map(Reserver::email),
                gift.id().value(),
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Deletes a gift.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the gift was found and deleted
    /// - `Ok(false)` if no row has that id
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_gift(conn: &Connection, id: GiftId) -> Result<bool> {
        let rows_affected = conn.execute(DELETE_GIFT, params![id.value()])?;
        Ok(rows_affected > 0)
    }
}
