use axum::extract::State;
use axum::{Json, http::StatusCode};
use serde::{Deserialize, Serialize};

use identity_mongodb::CancellationToken;

use crate::error::SampleError;
use crate::state::AppState;
use crate::usecase::role::CreateRoleUseCase;

// ── POST /roles ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateRoleRequest {
    pub name: String,
}

#[derive(Serialize)]
pub struct RoleResponse {
    pub id: String,
    pub name: Option<String>,
    pub normalized_name: Option<String>,
}

pub async fn create_role(
    State(state): State<AppState>,
    Json(body): Json<CreateRoleRequest>,
) -> Result<(StatusCode, Json<RoleResponse>), SampleError> {
    let usecase = CreateRoleUseCase {
        store: state.role_store(),
    };
    let role = usecase
        .execute(&body.name, &CancellationToken::new())
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(RoleResponse {
            id: role.id().to_hex(),
            name: role.name,
            normalized_name: role.normalized_name,
        }),
    ))
}
