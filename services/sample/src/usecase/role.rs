use tracing::info;

use identity_domain::{Role, normalize};
use identity_mongodb::CancellationToken;
use identity_mongodb::store::RoleStore;

use crate::error::SampleError;

pub struct CreateRoleUseCase<S: RoleStore> {
    pub store: S,
}

impl<S: RoleStore> CreateRoleUseCase<S> {
    pub async fn execute(&self, name: &str, cancel: &CancellationToken) -> Result<Role, SampleError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SampleError::InvalidRequest("role name is empty"));
        }
        let mut role = Role::new(name);
        let normalized = normalize(name);
        if self.store.find_by_name(&normalized, cancel).await?.is_some() {
            return Err(SampleError::RoleAlreadyExists);
        }
        self.store
            .set_normalized_role_name(&mut role, Some(&normalized), cancel)
            .await?;
        self.store.create(&role, cancel).await?;
        info!(role_id = %role.id(), role = %normalized, "role created");
        Ok(role)
    }
}
