//! Administrative routes. Every handler except `login` is behind [`AdminGate`].

use axum::extract::{Path, State};
use axum::Json;

use super::{parse_id, AdminGate};
use crate::dto::{Ack, ApiJson, CreateRequest, EditRequest, LoginRequest};
use crate::error::ApiError;
use crate::state::AppState;

/// `POST /api/admin/login`
pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<Json<Ack>, ApiError> {
    state.secret().authorize(body.senha.as_deref())?;
    Ok(Json(Ack::ok()))
}

/// `POST /api/admin/presentes`
pub async fn create(
    _gate: AdminGate,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateRequest>,
) -> Result<Json<Ack>, ApiError> {
    let new_gift = body.into_new_gift()?;
    let gift = state.with_store(move |store| store.create(new_gift)).await?;
    Ok(Json(Ack::created(gift.id().value())))
}

/// `PUT /api/admin/presentes/:id`
pub async fn edit(
    _gate: AdminGate,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<EditRequest>,
) -> Result<Json<Ack>, ApiError> {
    let id = parse_id(&id)?;
    let edit = body.into_edit()?;
    state.with_store(move |store| store.edit(id, edit)).await?;
    Ok(Json(Ack::ok()))
}

/// `DELETE /api/admin/presentes/:id`
pub async fn delete(
    _gate: AdminGate,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Ack>, ApiError> {
    let id = parse_id(&id)?;
    state.with_store(move |store| store.delete(id)).await?;
    Ok(Json(Ack::ok()))
}

/// `POST /api/admin/remover-reserva/:id`
pub async fn release(
    _gate: AdminGate,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Ack>, ApiError> {
    let id = parse_id(&id)?;
    state.with_store(move |store| store.release(id)).await?;
    Ok(Json(Ack::with_message("Reserva removida com sucesso.")))
}
