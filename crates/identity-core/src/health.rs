use std::fmt::Display;
use std::future::Future;

use axum::http::StatusCode;

/// Handler for `GET /healthz`, liveness only.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Map a dependency probe to a readiness status. Failures are logged and
/// reported as 503.
pub async fn readiness<F, E>(probe: F) -> StatusCode
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    match probe.await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "readiness probe failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
