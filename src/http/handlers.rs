//! Plain request/response handlers.
//!
//! Stateless: every handler reads from the injected `EntityStore` and
//! responds with a structured payload and a standard status code.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::http::server::AppState;

/// `GET /health` — fixed success payload.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// `GET /api/v1/users/{id}` — fetch an entity by identifier.
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let entity = state.store.get(&id);
    (StatusCode::OK, Json(entity))
}

/// `POST /api/v1/users` — create an entity, respond with an acknowledgment.
///
/// The body is decoded leniently; a missing or malformed payload still
/// produces an acknowledgment with defaults.
pub async fn create_user(
    State(state): State<AppState>,
    body: axum::body::Bytes,
) -> impl IntoResponse {
    let payload = serde_json::from_slice(&body).unwrap_or_default();
    let entity = state.store.create(payload);

    tracing::debug!(entity_id = %entity.id, "entity created");

    (
        StatusCode::CREATED,
        Json(serde_json::json!({ "status": "created" })),
    )
}
