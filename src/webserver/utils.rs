/// Response helpers
///
/// The wire contract is deliberately small: success bodies are the payload
/// itself, failures are `{"error": "..."}` (plus `details` for validation
/// errors). Downstream failure details never reach the client - they go to
/// the server log only.
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;

pub fn success_response<T: Serialize>(payload: T) -> Response {
    (StatusCode::OK, Json(payload)).into_response()
}

pub fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// 400 with the list of query-parameter validation errors
pub fn validation_error_response(errors: Vec<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": "validation failed", "details": errors })),
    )
        .into_response()
}

/// 400 for a missing required body field
pub fn missing_field_response(field: &str) -> Response {
    error_response(StatusCode::BAD_REQUEST, &format!("{} is required", field))
}
