//! Public routes: listing and reserving.

use axum::extract::{Path, State};
use axum::Json;

use super::parse_id;
use crate::dto::{Ack, ApiJson, GiftRecord, ReserveRequest};
use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/presentes`
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<GiftRecord>>, ApiError> {
    let gifts = state.with_store(|store| store.list()).await?;
    Ok(Json(gifts.iter().map(GiftRecord::from).collect()))
}

/// `POST /api/reservar/:id`
pub async fn reserve(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<ReserveRequest>,
) -> Result<Json<Ack>, ApiError> {
    let id = parse_id(&id)?;
    let reserver = body.into_reserver()?;
    state
        .with_store(move |store| store.reserve(id, reserver))
        .await?;
    Ok(Json(Ack::with_message("Presente reservado com sucesso")))
}
