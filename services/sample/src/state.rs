use identity_mongodb::{IdentityStores, MongoRoleStore, MongoUserStore};

use crate::infra::userinfo::HttpUserInfoClient;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub stores: IdentityStores,
    pub userinfo: HttpUserInfoClient,
}

impl AppState {
    pub fn user_store(&self) -> MongoUserStore {
        self.stores.user_store()
    }

    pub fn role_store(&self) -> MongoRoleStore {
        self.stores.role_store()
    }
}
