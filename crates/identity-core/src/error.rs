use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Render the `{ "kind", "message" }` body every service error uses.
pub fn error_response(status: StatusCode, kind: &'static str, message: String) -> Response {
    let body = serde_json::json!({
        "kind": kind,
        "message": message,
    });
    (status, Json(body)).into_response()
}
