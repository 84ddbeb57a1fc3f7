use axum::{
    Router,
    routing::{get, post},
};

use identity_core::health::healthz;
use identity_core::middleware::{propagate_request_id_layer, request_id_layer, trace_layer};

use crate::handlers::{
    external::external_login,
    health::readyz,
    roles::create_role,
    users::{add_user_role, get_user},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // External sign-in
        .route("/external/{provider}/login", post(external_login))
        // Users
        .route("/users/{id}", get(get_user))
        .route("/users/{id}/roles", post(add_user_role))
        // Roles
        .route("/roles", post(create_role))
        .layer(propagate_request_id_layer())
        .layer(trace_layer())
        .layer(request_id_layer())
        .with_state(state)
}
