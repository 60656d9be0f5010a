//! Service endpoints: liveness and the `OpenAPI` document.

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde::Serialize;

use crate::error::AppError;
use crate::openapi::openapi_json;
use crate::state::AppState;

/// Liveness payload.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct Health {
    pub status: String,
}

/// System route group.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/docs/openapi.json", get(get_openapi_json))
}

/// `GET /health`
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses((status = 200, description = "Service is up", body = Health))
)]
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
    })
}

/// Returns the API description as JSON.
#[utoipa::path(
    get,
    path = "/api/docs/openapi.json",
    tag = "system",
    responses(
        (status = 200, description = "OpenAPI document", body = String, content_type = "application/json"),
        (status = 500, description = "Serialization failure", body = crate::error::ErrorBody),
    )
)]
pub async fn get_openapi_json() -> Response {
    match openapi_json() {
        Ok(spec) => (StatusCode::OK, [(CONTENT_TYPE, "application/json")], spec).into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}
