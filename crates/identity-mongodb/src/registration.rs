use tracing::info;

use crate::context::MongoDbContext;
use crate::error::StoreError;
use crate::options::MongoDbOptions;
use crate::role_store::MongoRoleStore;
use crate::user_store::MongoUserStore;

/// Wires both stores to one shared [`MongoDbContext`].
///
/// Hold one of these in application state and hand out stores per request;
/// each store is a cheap clone of the context.
#[derive(Clone, Debug)]
pub struct IdentityStores {
    context: MongoDbContext,
}

impl IdentityStores {
    pub fn new(context: MongoDbContext) -> Self {
        Self { context }
    }

    /// Connect with `options` and create indexes for every collection that
    /// asks for them.
    pub async fn connect(options: MongoDbOptions) -> Result<Self, StoreError> {
        let context = MongoDbContext::connect(options).await?;
        context.ensure_indexes().await?;
        info!(
            database = %context.database().name(),
            users = %context.users().name(),
            roles = %context.roles().name(),
            "identity stores ready"
        );
        Ok(Self::new(context))
    }

    pub fn user_store(&self) -> MongoUserStore {
        MongoUserStore::new(self.context.clone())
    }

    pub fn role_store(&self) -> MongoRoleStore {
        MongoRoleStore::new(self.context.clone())
    }

    pub fn context(&self) -> &MongoDbContext {
        &self.context
    }
}
