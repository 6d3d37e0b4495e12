//! Image upload.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::header::HOST;
use axum::http::HeaderMap;
use axum::Json;

use super::AdminGate;
use crate::dto::UploadResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// Multipart field holding the image.
pub const FILE_FIELD: &str = "file";

/// `POST /api/admin/upload`
pub async fn upload(
    _gate: AdminGate,
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut multipart = multipart?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let original_name = field.file_name().map(str::to_string);
        let contents = field.bytes().await?;

        let stored = state
            .with_images(move |images| images.save(original_name.as_deref(), &contents))
            .await?;

        let image_url = public_url(&headers, &stored.file_name);
        log::info!("image saved at {image_url}");
        return Ok(Json(UploadResponse { image_url }));
    }

    Err(ApiError::BadRequest("no file uploaded".into()))
}

/// `<scheme>://<host>/images/<file>` as seen by the client.
fn public_url(headers: &HeaderMap, file_name: &str) -> String {
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map_or("http", str::trim);
    let host = headers
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    format!("{scheme}://{host}/images/{file_name}")
}
