//! Library exports for giftlist-server.
//!
//! The HTTP layer of the gift registry: [`router`] builds the axum
//! application around an [`AppState`].

pub mod cli;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

pub use cli::Cli;
pub use error::ApiError;
pub use state::AppState;

use handlers::{admin, gifts, upload};

/// Largest accepted request body, uploads included.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Builds the application router.
///
/// | route                                   | handler             |
/// |-----------------------------------------|---------------------|
/// | `GET /api/presentes`                    | [`gifts::list`]     |
/// | `POST /api/reservar/:id`                | [`gifts::reserve`]  |
/// | `POST /api/admin/login`                 | [`admin::login`]    |
/// | `POST /api/admin/presentes`             | [`admin::create`]   |
/// | `PUT /api/admin/presentes/:id`          | [`admin::edit`]     |
/// | `DELETE /api/admin/presentes/:id`       | [`admin::delete`]   |
/// | `POST /api/admin/remover-reserva/:id`   | [`admin::release`]  |
/// | `POST /api/admin/upload`                | [`upload::upload`]  |
/// | `GET /images/*`                         | uploaded files      |
pub fn router(state: AppState) -> Router {
    let images = ServeDir::new(state.images().dir());

    Router::new()
        .route("/api/presentes", get(gifts::list))
        .route("/api/reservar/:id", post(gifts::reserve))
        .route("/api/admin/login", post(admin::login))
        .route("/api/admin/presentes", post(admin::create))
        .route(
            "/api/admin/presentes/:id",
            put(admin::edit).delete(admin::delete),
        )
        .route("/api/admin/remover-reserva/:id", post(admin::release))
        .route("/api/admin/upload", post(upload::upload))
        .nest_service("/images", images)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
