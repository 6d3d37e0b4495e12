//! Gift records and the reservation state machine.
//!
//! A [`Gift`] is either [`ReservationState::Open`] or
//! [`ReservationState::Reserved`] by a [`Reserver`]. The reserver's name and
//! email only exist inside the `Reserved` variant, so a record can never
//! carry one without the other or carry them while open.
//!
//! All transitions are methods on [`Gift`] so that every store applies them
//! identically:
//!
//! | transition           | from       | to         | failure                    |
//! |----------------------|------------|------------|----------------------------|
//! | [`Gift::reserve`]    | `Open`     | `Reserved` | `Conflict` if reserved     |
//! | [`Gift::release`]    | `Reserved` | `Open`     | `InvalidState` if open     |
//! | [`Gift::apply_edit`] | any        | any        | `Validation` (see below)   |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Identifier of a gift record, assigned by the store (always positive).
///
/// # Examples
///
/// ```
/// use giftlist::GiftId;
///
/// let id = GiftId::try_from(1).unwrap();
/// assert_eq!(id.value(), 1);
/// assert!(GiftId::try_from(0).is_err());
/// assert_eq!("42".parse::<GiftId>().unwrap().value(), 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GiftId(i64);

impl GiftId {
    /// Returns the underlying integer.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for GiftId {
    type Error = ValidationError;

    fn try_from(value: i64) -> std::result::Result<Self, Self::Error> {
        if value <= 0 {
            Err(ValidationError {
                field: "id".into(),
                message: format!("gift id must be positive, got {value}"),
            })
        } else {
            Ok(Self(value))
        }
    }
}

impl FromStr for GiftId {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let value: i64 = s.trim().parse().map_err(|_| ValidationError {
            field: "id".into(),
            message: format!("'{s}' is not a valid gift id"),
        })?;
        Self::try_from(value)
    }
}

impl fmt::Display for GiftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error produced when constructing a value from invalid input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// Description of the failure.
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

fn required(field: &str, value: &str) -> std::result::Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError {
            field: field.into(),
            message: format!("{field} is required"),
        });
    }
    Ok(trimmed.to_string())
}

/// The visitor who reserved a gift.
///
/// # Examples
///
/// ```
/// use giftlist::Reserver;
///
/// let who = Reserver::new("Ana", "ana@x.com").unwrap();
/// assert_eq!(who.name(), "Ana");
/// assert!(Reserver::new("Ana", "  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reserver {
    name: String,
    email: String,
}

impl Reserver {
    /// Creates a reserver from a name and email, both required.
    ///
    /// # Errors
    ///
    /// Returns an error if either value is empty after trimming whitespace.
    pub fn new(
        name: impl AsRef<str>,
        email: impl AsRef<str>,
    ) -> std::result::Result<Self, ValidationError> {
        Ok(Self {
            name: required("nome", name.as_ref())?,
            email: required("email", email.as_ref())?,
        })
    }

    /// Returns the reserver's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the reserver's email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Reservation status of a gift.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReservationState {
    /// Nobody has claimed the gift.
    #[default]
    Open,
    /// Claimed by the contained reserver.
    Reserved(Reserver),
}

impl ReservationState {
    /// Returns `true` for [`ReservationState::Reserved`].
    #[must_use]
    pub const fn is_reserved(&self) -> bool {
        matches!(self, Self::Reserved(_))
    }

    /// Returns the reserver, if any.
    #[must_use]
    pub const fn reserver(&self) -> Option<&Reserver> {
        match self {
            Self::Open => None,
            Self::Reserved(who) => Some(who),
        }
    }
}

/// Fields of a gift about to be created.
///
/// # Examples
///
/// ```
/// use giftlist::NewGift;
///
/// let gift = NewGift::new("Blender", "Kitchen", "blender.png").unwrap();
/// assert_eq!(gift.name(), "Blender");
/// assert!(NewGift::new("Blender", "", "blender.png").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGift {
    name: String,
    description: String,
    image: String,
}

impl NewGift {
    /// Validates and creates a new gift description.
    ///
    /// # Errors
    ///
    /// Returns an error if any field is empty after trimming whitespace.
    pub fn new(
        name: impl AsRef<str>,
        description: impl AsRef<str>,
        image: impl AsRef<str>,
    ) -> std::result::Result<Self, ValidationError> {
        Ok(Self {
            name: required("nome", name.as_ref())?,
            description: required("descricao", description.as_ref())?,
            image: required("imagem", image.as_ref())?,
        })
    }

    /// Returns the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the image reference.
    #[must_use]
    pub fn image(&self) -> &str {
        &self.image
    }
}

/// An administrative overwrite of a gift.
///
/// `reserved` forces the reservation flag. Turning it off clears the
/// reserver. Turning it on keeps an existing reserver, or installs the one
/// given with [`GiftEdit::with_reserver`]; an open gift cannot be marked
/// reserved without one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiftEdit {
    details: NewGift,
    reserved: bool,
    reserver: Option<Reserver>,
}

impl GiftEdit {
    /// Validates the descriptive fields of an edit.
    ///
    /// # Errors
    ///
    /// Returns an error if any descriptive field is empty.
    pub fn new(
        name: impl AsRef<str>,
        description: impl AsRef<str>,
        image: impl AsRef<str>,
        reserved: bool,
    ) -> std::result::Result<Self, ValidationError> {
        Ok(Self {
            details: NewGift::new(name, description, image)?,
            reserved,
            reserver: None,
        })
    }

    /// Supplies the reserver to record when the edit marks the gift reserved.
    #[must_use]
    pub fn with_reserver(mut self, reserver: Reserver) -> Self {
        self.reserver = Some(reserver);
        self
    }

    /// Returns the requested reservation flag.
    #[must_use]
    pub const fn reserved(&self) -> bool {
        self.reserved
    }
}

/// A gift record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gift {
    id: GiftId,
    name: String,
    description: String,
    image: Option<String>,
    state: ReservationState,
}

impl Gift {
    /// Creates a builder for a gift read back from storage.
    ///
    /// # Examples
    ///
    /// ```
    /// use giftlist::{Gift, GiftId, Reserver, ReservationState};
    ///
    /// let gift = Gift::builder(GiftId::try_from(3).unwrap(), "Vase")
    ///     .description("Glass")
    ///     .state(ReservationState::Reserved(Reserver::new("Bia", "bia@x.com").unwrap()))
    ///     .build()
    ///     .unwrap();
    /// assert!(gift.is_reserved());
    /// assert_eq!(gift.image(), None);
    /// ```
    #[must_use]
    pub fn builder(id: GiftId, name: impl Into<String>) -> GiftBuilder {
        GiftBuilder {
            id,
            name: name.into(),
            description: String::new(),
            image: None,
            state: ReservationState::Open,
        }
    }

    /// Creates an open gift with the given id.
    #[must_use]
    pub fn open(id: GiftId, new: NewGift) -> Self {
        Self {
            id,
            name: new.name,
            description: new.description,
            image: Some(new.image),
            state: ReservationState::Open,
        }
    }

    /// Returns the id.
    #[must_use]
    pub const fn id(&self) -> GiftId {
        self.id
    }

    /// Returns the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the image reference, if any.
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Returns the reservation state.
    #[must_use]
    pub const fn state(&self) -> &ReservationState {
        &self.state
    }

    /// Returns `true` when the gift is reserved.
    #[must_use]
    pub const fn is_reserved(&self) -> bool {
        self.state.is_reserved()
    }

    /// Returns the reserver, if any.
    #[must_use]
    pub const fn reserver(&self) -> Option<&Reserver> {
        self.state.reserver()
    }

    /// Reserves an open gift.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conflict`] if the gift is already reserved.
    pub fn reserve(&mut self, reserver: Reserver) -> Result<()> {
        if self.is_reserved() {
            return Err(Error::Conflict {
                details: format!("gift {} is already reserved", self.id),
            });
        }
        self.state = ReservationState::Reserved(reserver);
        Ok(())
    }

    /// Returns a reserved gift to the open state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] if the gift is not reserved.
    pub fn release(&mut self) -> Result<()> {
        if !self.is_reserved() {
            return Err(Error::InvalidState {
                details: format!("gift {} is not reserved", self.id),
            });
        }
        self.state = ReservationState::Open;
        Ok(())
    }

    /// Overwrites the gift with an administrative edit.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the edit marks an open gift reserved
    /// without naming a reserver. The gift is left untouched in that case.
    pub fn apply_edit(&mut self, edit: GiftEdit) -> Result<()> {
        let state = match (edit.reserved, edit.reserver, &self.state) {
            (false, _, _) => ReservationState::Open,
            (true, Some(who), _) => ReservationState::Reserved(who),
            (true, None, ReservationState::Reserved(who)) => ReservationState::Reserved(who.clone()),
            (true, None, ReservationState::Open) => {
                return Err(Error::validation(
                    "reservado_por_nome",
                    format!(
                        "gift {} is open; marking it reserved requires a name and email",
                        self.id
                    ),
                ));
            }
        };

        self.name = edit.details.name;
        self.description = edit.details.description;
        self.image = Some(edit.details.image);
        self.state = state;
        Ok(())
    }
}

/// Builder for [`Gift`] values loaded from storage.
#[derive(Debug, Clone)]
pub struct GiftBuilder {
    id: GiftId,
    name: String,
    description: String,
    image: Option<String>,
    state: ReservationState,
}

impl GiftBuilder {
    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the image reference; empty strings count as absent.
    #[must_use]
    pub fn image(mut self, image: Option<String>) -> Self {
        self.image = image.filter(|s| !s.trim().is_empty());
        self
    }

    /// Sets the reservation state.
    #[must_use]
    pub fn state(mut self, state: ReservationState) -> Self {
        self.state = state;
        self
    }

    /// Builds the gift.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty.
    pub fn build(self) -> std::result::Result<Gift, ValidationError> {
        Ok(Gift {
            id: self.id,
            name: required("nome", &self.name)?,
            description: self.description,
            image: self.image,
            state: self.state,
        })
    }
}

#[cfg(all(test, feature = "property-tests"))]
mod proptests;
