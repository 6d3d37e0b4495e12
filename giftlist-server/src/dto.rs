//! Request and response bodies.
//!
//! Field names are the registry's historical wire names (`nome`, `descricao`,
//! `reservado`, ...), which the existing front end depends on.

use axum::extract::FromRequest;
use giftlist::{Gift, GiftEdit, NewGift, Reserver, ValidationError};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// JSON body extractor whose rejections use the API's error shape.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// A gift as listed by `GET /api/presentes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftRecord {
    /// Gift id.
    pub id: i64,
    /// Name.
    pub nome: String,
    /// Description.
    pub descricao: String,
    /// Image reference.
    pub imagem: Option<String>,
    /// `1` when reserved, `0` otherwise.
    pub reservado: u8,
    /// Reserver's name.
    pub reservado_por_nome: Option<String>,
    /// Reserver's email.
    pub reservado_por_email: Option<String>,
}

impl From<&Gift> for GiftRecord {
    fn from(gift: &Gift) -> Self {
        let reserver = gift.reserver();
        Self {
            id: gift.id().value(),
            nome: gift.name().to_string(),
            descricao: gift.description().to_string(),
            imagem: gift.image().map(str::to_string),
            reservado: u8::from(gift.is_reserved()),
            reservado_por_nome: reserver.map(|r| r.name().to_string()),
            reservado_por_email: reserver.map(|r| r.email().to_string()),
        }
    }
}

/// Body of `POST /api/reservar/:id`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ReserveRequest {
    /// Reserver's name.
    pub nome: Option<String>,
    /// Reserver's email.
    pub email: Option<String>,
}

impl ReserveRequest {
    /// Validates the reserver.
    ///
    /// # Errors
    ///
    /// Returns an error if either field is missing or blank.
    pub fn into_reserver(self) -> Result<Reserver, ValidationError> {
        Reserver::new(
            self.nome.unwrap_or_default(),
            self.email.unwrap_or_default(),
        )
    }
}

/// Body of `POST /api/admin/login`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    /// The candidate password.
    pub senha: Option<String>,
}

/// Body of `POST /api/admin/presentes`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateRequest {
    /// Name.
    pub nome: Option<String>,
    /// Description.
    pub descricao: Option<String>,
    /// Image reference.
    pub imagem: Option<String>,
}

impl CreateRequest {
    /// Validates the new gift.
    ///
    /// # Errors
    ///
    /// Returns an error if any field is missing or blank.
    pub fn into_new_gift(self) -> Result<NewGift, ValidationError> {
        NewGift::new(
            self.nome.unwrap_or_default(),
            self.descricao.unwrap_or_default(),
            self.imagem.unwrap_or_default(),
        )
    }
}

/// The reservation flag, sent either as a boolean or as `0`/`1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ReservedFlag {
    /// `true` / `false`.
    Bool(bool),
    /// `0` / non-zero.
    Int(i64),
}

impl ReservedFlag {
    /// Whether the flag asks for a reservation.
    #[must_use]
    pub const fn is_set(self) -> bool {
        match self {
            Self::Bool(value) => value,
            Self::Int(value) => value != 0,
        }
    }
}

/// Body of `PUT /api/admin/presentes/:id`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EditRequest {
    /// Name.
    pub nome: Option<String>,
    /// Description.
    pub descricao: Option<String>,
    /// Image reference.
    pub imagem: Option<String>,
    /// Requested reservation flag; absent means open.
    pub reservado: Option<ReservedFlag>,
    /// Reserver's name, used when the edit reserves an open gift.
    pub reservado_por_nome: Option<String>,
    /// Reserver's email, used when the edit reserves an open gift.
    pub reservado_por_email: Option<String>,
}

impl EditRequest {
    /// Validates the edit.
    ///
    /// # Errors
    ///
    /// Returns an error if a descriptive field is blank, or if only one of
    /// the reserver fields is given.
    pub fn into_edit(self) -> Result<GiftEdit, ValidationError> {
        let reserved = self.reservado.is_some_and(ReservedFlag::is_set);
        let edit = GiftEdit::new(
            self.nome.unwrap_or_default(),
            self.descricao.unwrap_or_default(),
            self.imagem.unwrap_or_default(),
            reserved,
        )?;

        let name = self.reservado_por_nome.filter(|s| !s.trim().is_empty());
        let email = self.reservado_por_email.filter(|s| !s.trim().is_empty());
        match (name, email) {
            (None, None) => Ok(edit),
            (name, email) => Ok(edit.with_reserver(Reserver::new(
                name.unwrap_or_default(),
                email.unwrap_or_default(),
            )?)),
        }
    }
}

/// Successful mutation acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    /// Always `true`.
    pub success: bool,
    /// Human-readable outcome.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Id of a newly created gift.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl Ack {
    /// A bare `{"success": true}`.
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            success: true,
            message: None,
            id: None,
        }
    }

    /// Success with a message.
    #[must_use]
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok()
        }
    }

    /// Success reporting a created id.
    #[must_use]
    pub const fn created(id: i64) -> Self {
        Self {
            success: true,
            message: None,
            id: Some(id),
        }
    }
}

/// Response of `POST /api/admin/upload`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Public URL of the stored image.
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

/// Failure body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
}

impl ErrorBody {
    /// Wraps a message.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
