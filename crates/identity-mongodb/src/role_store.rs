use futures::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::Document;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use identity_domain::Role;

use crate::cancel::{ensure_active, with_cancel};
use crate::context::MongoDbContext;
use crate::error::StoreError;
use crate::filter;
use crate::store::{QueryableRoleStore, RoleStore};

/// Role store backed by the role collection of a [`MongoDbContext`].
#[derive(Clone, Debug)]
pub struct MongoRoleStore {
    context: MongoDbContext,
}

impl MongoRoleStore {
    pub fn new(context: MongoDbContext) -> Self {
        Self { context }
    }

    fn collection(&self) -> &Collection<Role> {
        self.context.roles()
    }

    fn scoped(&self, filter: Document) -> Document {
        self.context.role_filter(filter)
    }
}

impl RoleStore for MongoRoleStore {
    async fn create(&self, role: &Role, cancel: &CancellationToken) -> Result<(), StoreError> {
        with_cancel(cancel, self.collection().insert_one(role)).await?;
        debug!(role_id = %role.id(), "role created");
        Ok(())
    }

    async fn delete(&self, role: &Role, cancel: &CancellationToken) -> Result<(), StoreError> {
        let filter = self.scoped(filter::by_id(role.id().0));
        let result = with_cancel(cancel, self.collection().delete_one(filter)).await?;
        debug!(role_id = %role.id(), deleted = result.deleted_count, "role deleted");
        Ok(())
    }

    async fn update(&self, role: &Role, cancel: &CancellationToken) -> Result<(), StoreError> {
        let filter = self.scoped(filter::by_id(role.id().0));
        let previous =
            with_cancel(cancel, self.collection().find_one_and_replace(filter, role)).await?;
        if previous.is_none() {
            warn!(role_id = %role.id(), "update matched no role document");
        }
        Ok(())
    }

    /// Roles are looked up by normalized name only.
    async fn find_by_id(
        &self,
        _role_id: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<Role>, StoreError> {
        ensure_active(cancel)?;
        Err(StoreError::NotSupported("find role by id"))
    }

    async fn find_by_name(
        &self,
        normalized_role_name: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<Role>, StoreError> {
        let filter = self.scoped(filter::by_normalized_name(normalized_role_name));
        with_cancel(cancel, self.collection().find_one(filter)).await
    }

    async fn role_id(&self, role: &Role, cancel: &CancellationToken) -> Result<String, StoreError> {
        ensure_active(cancel)?;
        Ok(role.id().to_hex())
    }

    async fn role_name(
        &self,
        role: &Role,
        cancel: &CancellationToken,
    ) -> Result<Option<String>, StoreError> {
        ensure_active(cancel)?;
        Ok(role.name.clone())
    }

    async fn set_role_name(
        &self,
        role: &mut Role,
        role_name: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        ensure_active(cancel)?;
        role.name = role_name.map(str::to_owned);
        Ok(())
    }

    async fn normalized_role_name(
        &self,
        role: &Role,
        cancel: &CancellationToken,
    ) -> Result<Option<String>, StoreError> {
        ensure_active(cancel)?;
        Ok(role.normalized_name.clone())
    }

    async fn set_normalized_role_name(
        &self,
        role: &mut Role,
        normalized_name: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        ensure_active(cancel)?;
        role.normalized_name = normalized_name.map(str::to_owned);
        Ok(())
    }
}

impl QueryableRoleStore for MongoRoleStore {
    async fn roles(&self, cancel: &CancellationToken) -> Result<Vec<Role>, StoreError> {
        let roles = self.collection();
        let filter = self.scoped(filter::all());
        with_cancel(cancel, async move {
            let cursor = roles.find(filter).await?;
            cursor.try_collect::<Vec<Role>>().await
        })
        .await
    }
}
