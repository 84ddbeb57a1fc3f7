use axum::extract::State;
use axum::http::StatusCode;

use identity_core::health::readiness;

use crate::state::AppState;

/// Handler for `GET /readyz`; ready once MongoDB answers a ping.
pub async fn readyz(State(state): State<AppState>) -> StatusCode {
    readiness(state.stores.context().ping()).await
}
