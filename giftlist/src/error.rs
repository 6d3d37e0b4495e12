//! Error types for the giftlist library.
//!
//! This module provides the error hierarchy for every store operation,
//! using `thiserror` for ergonomic error handling. Each variant belongs to
//! one [`ErrorKind`], which is what callers map to responses.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::gift::GiftId;

/// Result type alias for operations that may fail with a giftlist error.
///
/// # Examples
///
/// ```
/// use giftlist::{Error, Result};
///
/// fn example_operation() -> Result<i64> {
///     Ok(1)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the giftlist library.
#[derive(Debug, Error)]
pub enum Error {
    /// No gift record with the given id exists.
    #[error("gift {id} not found")]
    NotFound {
        /// The id that was looked up.
        id: GiftId,
    },

    /// A state transition precondition was violated (e.g. double reservation).
    #[error("reservation conflict: {details}")]
    Conflict {
        /// Details about the conflict.
        details: String,
    },

    /// The record is not in the state the operation requires.
    #[error("invalid state: {details}")]
    InvalidState {
        /// Details about the current state.
        details: String,
    },

    /// A required field was missing or malformed.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// The admin secret did not match.
    #[error("unauthorized: admin password mismatch")]
    Unauthorized,

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The database is locked by another writer for longer than the busy timeout.
    #[error("database lock timeout after {millis}ms")]
    LockTimeout {
        /// The configured busy timeout in milliseconds.
        millis: u64,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },

    /// The data directory could not be determined.
    #[error("data directory not found: {}", path.display())]
    DataDirectoryNotFound {
        /// The expected path to the data directory.
        path: PathBuf,
    },
}

/// Coarse classification of [`Error`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No record with the given id.
    NotFound,
    /// Double reservation and similar precondition failures.
    Conflict,
    /// Operation not valid in the record's current state.
    InvalidState,
    /// Missing or empty required fields.
    InvalidInput,
    /// Admin secret mismatch.
    Unauthorized,
    /// Underlying persistence failure; the only kind a caller may retry.
    StorageFailure,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not-found"),
            Self::Conflict => write!(f, "conflict"),
            Self::InvalidState => write!(f, "invalid-state"),
            Self::InvalidInput => write!(f, "invalid-input"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::StorageFailure => write!(f, "storage-failure"),
        }
    }
}

impl From<crate::gift::ValidationError> for Error {
    fn from(err: crate::gift::ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

impl Error {
    /// Returns the kind this error belongs to.
    ///
    /// # Examples
    ///
    /// ```
    /// use giftlist::{Error, ErrorKind};
    ///
    /// let err = Error::Conflict { details: "already reserved".into() };
    /// assert_eq!(err.kind(), ErrorKind::Conflict);
    /// ```
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::InvalidState { .. } => ErrorKind::InvalidState,
            Self::Validation { .. } => ErrorKind::InvalidInput,
            Self::Unauthorized => ErrorKind::Unauthorized,
            Self::Database(_)
            | Self::Configuration(_)
            | Self::Io(_)
            | Self::LockTimeout { .. }
            | Self::UnsupportedSchemaVersion { .. }
            | Self::DataDirectoryNotFound { .. } => ErrorKind::StorageFailure,
        }
    }

    /// Shorthand for a validation error on `field`.
    pub(crate) fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Converts a rusqlite error, mapping `SQLITE_BUSY` to [`Error::LockTimeout`].
    pub(crate) fn from_sqlite(err: rusqlite::Error, busy_timeout_ms: u64) -> Self {
        match err.sqlite_error_code() {
            Some(rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked) => {
                Self::LockTimeout {
                    millis: busy_timeout_ms,
                }
            }
            _ => Self::Database(err),
        }
    }
}
