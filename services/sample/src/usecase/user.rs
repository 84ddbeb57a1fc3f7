use identity_domain::{User, normalize};
use identity_mongodb::store::{UserRoleStore, UserStore};
use identity_mongodb::{CancellationToken, StoreError};

use crate::error::SampleError;

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<S: UserStore> {
    pub store: S,
}

impl<S: UserStore> GetUserUseCase<S> {
    pub async fn execute(
        &self,
        user_id: &str,
        cancel: &CancellationToken,
    ) -> Result<User, SampleError> {
        self.store
            .find_by_id(user_id, cancel)
            .await?
            .ok_or(SampleError::UserNotFound)
    }
}

// ── AddUserToRole ────────────────────────────────────────────────────────────

pub struct AddUserToRoleUseCase<S: UserRoleStore> {
    pub store: S,
}

impl<S: UserRoleStore> AddUserToRoleUseCase<S> {
    pub async fn execute(
        &self,
        user_id: &str,
        role_name: &str,
        cancel: &CancellationToken,
    ) -> Result<User, SampleError> {
        let normalized = normalize(role_name);
        if normalized.is_empty() {
            return Err(SampleError::InvalidRequest("role name is empty"));
        }
        let mut user = self
            .store
            .find_by_id(user_id, cancel)
            .await?
            .ok_or(SampleError::UserNotFound)?;
        self.store
            .add_to_role(&mut user, &normalized, cancel)
            .await
            .map_err(|e| match e {
                StoreError::InvalidOperation(_) => SampleError::RoleNotFound(normalized.clone()),
                other => other.into(),
            })?;
        self.store.update(&user, cancel).await?;
        Ok(user)
    }
}
