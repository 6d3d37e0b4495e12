//! Request handlers, one module per audience.

pub mod admin;
pub mod gifts;
pub mod upload;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use giftlist::GiftId;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the admin password on administrative routes.
pub const ADMIN_HEADER: &str = "x-admin-password";

/// Extractor that admits only requests carrying the admin password.
///
/// Place it first in a handler's arguments so the gate runs before the body
/// is read.
#[derive(Debug, Clone, Copy)]
pub struct AdminGate;

#[async_trait]
impl FromRequestParts<AppState> for AdminGate {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let candidate = parts
            .headers
            .get(ADMIN_HEADER)
            .and_then(|value| value.to_str().ok());
        if let Err(e) = state.secret().authorize(candidate) {
            log::warn!("rejected admin request to {}", parts.uri.path());
            return Err(e.into());
        }
        Ok(Self)
    }
}

/// Parses a path id, rejecting non-numeric and non-positive values.
pub(crate) fn parse_id(raw: &str) -> Result<GiftId, ApiError> {
    Ok(raw.parse::<GiftId>()?)
}
