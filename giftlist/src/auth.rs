//! The admin gate: one shared secret guarding every administrative call.

use std::fmt;

use subtle::ConstantTimeEq;

use crate::error::{Error, Result};
use crate::gift::ValidationError;

/// The administrator password.
///
/// Comparison runs in constant time with respect to the secret's contents.
/// The value is never printed by `Debug`.
///
/// # Examples
///
/// ```
/// use giftlist::AdminSecret;
///
/// let secret = AdminSecret::new("hunter2").unwrap();
/// assert!(secret.verify("hunter2"));
/// assert!(!secret.verify("hunter3"));
/// assert!(secret.authorize(None).is_err());
/// ```
#[derive(Clone)]
pub struct AdminSecret(String);

impl AdminSecret {
    /// Wraps a non-empty secret.
    ///
    /// # Errors
    ///
    /// Returns an error if the secret is empty.
    pub fn new(secret: impl Into<String>) -> std::result::Result<Self, ValidationError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ValidationError {
                field: "admin_password".into(),
                message: "admin password must not be empty".into(),
            });
        }
        Ok(Self(secret))
    }

    /// Returns `true` if `candidate` equals the secret exactly.
    #[must_use]
    pub fn verify(&self, candidate: &str) -> bool {
        self.0.as_bytes().ct_eq(candidate.as_bytes()).into()
    }

    /// Checks an optional credential.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`] if `candidate` is absent or wrong.
    pub fn authorize(&self, candidate: Option<&str>) -> Result<()> {
        match candidate {
            Some(candidate) if self.verify(candidate) => Ok(()),
            _ => Err(Error::Unauthorized),
        }
    }
}

impl fmt::Debug for AdminSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AdminSecret(..)")
    }
}
