use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use identity_core::error::error_response;
use identity_mongodb::StoreError;

/// Sample service error variants.
#[derive(Debug, thiserror::Error)]
pub enum SampleError {
    #[error("unknown provider '{0}'")]
    UnknownProvider(String),
    #[error("could not retrieve user information from {provider} ({status})")]
    UserInfoUnavailable { provider: &'static str, status: u16 },
    #[error("user information has no account id")]
    MissingProviderKey,
    #[error("email belongs to another account and is not verified by the provider")]
    UnverifiedEmail,
    #[error("invalid request: {0}")]
    InvalidRequest(&'static str),
    #[error("user not found")]
    UserNotFound,
    #[error("role '{0}' not found")]
    RoleNotFound(String),
    #[error("role already exists")]
    RoleAlreadyExists,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl SampleError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownProvider(_) => "UNKNOWN_PROVIDER",
            Self::UserInfoUnavailable { .. } => "USER_INFO_UNAVAILABLE",
            Self::MissingProviderKey => "MISSING_PROVIDER_KEY",
            Self::UnverifiedEmail => "UNVERIFIED_EMAIL",
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::RoleNotFound(_) => "ROLE_NOT_FOUND",
            Self::RoleAlreadyExists => "ROLE_ALREADY_EXISTS",
            Self::Store(e) => e.kind(),
            Self::Internal(_) => "INTERNAL",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::UnknownProvider(_) | Self::UserNotFound | Self::RoleNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            Self::UserInfoUnavailable { .. } | Self::MissingProviderKey => StatusCode::BAD_GATEWAY,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::RoleAlreadyExists | Self::UnverifiedEmail => StatusCode::CONFLICT,
            Self::Store(e) => match e {
                StoreError::InvalidOperation(_) => StatusCode::BAD_REQUEST,
                StoreError::DuplicateKey(_) => StatusCode::CONFLICT,
                StoreError::NotSupported(_) => StatusCode::NOT_IMPLEMENTED,
                StoreError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
                StoreError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SampleError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = ?self, kind = self.kind(), "internal error");
        }
        error_response(status, self.kind(), self.to_string())
    }
}
