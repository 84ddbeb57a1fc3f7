use axum::extract::{Path, State};
use axum::{Json, http::StatusCode};
use serde::{Deserialize, Serialize};

use identity_mongodb::CancellationToken;

use crate::domain::provider::ExternalProvider;
use crate::error::SampleError;
use crate::handlers::users::UserResponse;
use crate::state::AppState;
use crate::usecase::external_login::{ExternalLoginInput, ExternalLoginUseCase};

// ── POST /external/{provider}/login ──────────────────────────────────────────

#[derive(Deserialize)]
pub struct ExternalLoginRequest {
    pub access_token: String,
}

#[derive(Serialize)]
pub struct ExternalLoginResponse {
    pub created: bool,
    pub user: UserResponse,
}

pub async fn external_login(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    Json(body): Json<ExternalLoginRequest>,
) -> Result<(StatusCode, Json<ExternalLoginResponse>), SampleError> {
    let provider: ExternalProvider = provider.parse()?;
    let usecase = ExternalLoginUseCase {
        userinfo: state.userinfo.clone(),
        store: state.user_store(),
    };
    let output = usecase
        .execute(
            ExternalLoginInput {
                provider,
                access_token: body.access_token,
            },
            &CancellationToken::new(),
        )
        .await?;
    let status = if output.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((
        status,
        Json(ExternalLoginResponse {
            created: output.created,
            user: output.user.into(),
        }),
    ))
}
