use axum::extract::{Path, State};
use axum::{Json, http::StatusCode};
use serde::{Deserialize, Serialize};

use identity_domain::User;
use identity_mongodb::CancellationToken;

use crate::error::SampleError;
use crate::state::AppState;
use crate::usecase::user::{AddUserToRoleUseCase, GetUserUseCase};

#[derive(Serialize)]
pub struct LoginResponse {
    pub provider: String,
    pub provider_key: String,
    pub display_name: Option<String>,
}

#[derive(Serialize)]
pub struct ClaimResponse {
    #[serde(rename = "type")]
    pub claim_type: String,
    pub value: String,
}

#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub user_name: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub roles: Vec<String>,
    pub logins: Vec<LoginResponse>,
    pub claims: Vec<ClaimResponse>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id().to_hex(),
            user_name: user.user_name,
            name: user.name,
            email: user.email,
            roles: user.roles,
            logins: user
                .logins
                .into_iter()
                .map(|l| LoginResponse {
                    provider: l.login_provider,
                    provider_key: l.provider_key,
                    display_name: l.provider_display_name,
                })
                .collect(),
            claims: user
                .claims
                .into_iter()
                .map(|c| ClaimResponse {
                    claim_type: c.claim_type,
                    value: c.value,
                })
                .collect(),
        }
    }
}

// ── GET /users/{id} ──────────────────────────────────────────────────────────

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserResponse>, SampleError> {
    let usecase = GetUserUseCase {
        store: state.user_store(),
    };
    let user = usecase.execute(&user_id, &CancellationToken::new()).await?;
    Ok(Json(user.into()))
}

// ── POST /users/{id}/roles ───────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AddRoleRequest {
    pub role: String,
}

pub async fn add_user_role(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(body): Json<AddRoleRequest>,
) -> Result<StatusCode, SampleError> {
    let usecase = AddUserToRoleUseCase {
        store: state.user_store(),
    };
    usecase
        .execute(&user_id, &body.role, &CancellationToken::new())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
