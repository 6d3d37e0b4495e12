//! HTTP error responses.
//!
//! Every failure leaves the server as `{"error": "<message>"}` with a status
//! chosen from the library's [`ErrorKind`].

use std::fmt;

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use giftlist::{Error as LibError, ErrorKind};

use crate::dto::ErrorBody;

/// API error type with status code mapping.
#[derive(Debug)]
pub enum ApiError {
    /// Library error (wrapped).
    Library(LibError),

    /// A request body that could not be decoded.
    BadRequest(String),

    /// The blocking task running a store call failed.
    Internal(String),
}

impl ApiError {
    /// Get the HTTP status for this error.
    ///
    /// - 400: invalid input, reservation conflict, invalid state, bad body
    /// - 401: admin password mismatch
    /// - 404: unknown gift
    /// - 500: storage failure, internal failure
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Library(err) => match err.kind() {
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::Conflict | ErrorKind::InvalidState | ErrorKind::InvalidInput => {
                    StatusCode::BAD_REQUEST
                }
                ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
                ErrorKind::StorageFailure => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Library(e) => write!(f, "{e}"),
            Self::BadRequest(msg) => write!(f, "invalid request: {msg}"),
            Self::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Library(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LibError> for ApiError {
    fn from(err: LibError) -> Self {
        Self::Library(err)
    }
}

impl From<giftlist::ValidationError> for ApiError {
    fn from(err: giftlist::ValidationError) -> Self {
        Self::Library(err.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::BadRequest(err.body_text())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{self}");
        } else {
            log::debug!("request failed with {status}: {self}");
        }
        (status, Json(ErrorBody::new(self.to_string()))).into_response()
    }
}
