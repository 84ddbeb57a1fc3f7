use std::time::Duration;

use identity_mongodb::{CollectionOptions, MongoDbOptions};

use crate::domain::provider::ExternalProvider;
use crate::infra::userinfo::ProviderEndpoints;

/// Sample service configuration loaded from environment variables.
#[derive(Debug)]
pub struct SampleConfig {
    /// MongoDB connection string. Env var: `MONGODB_URL`.
    pub mongodb_url: String,
    /// Database name (default "identity"). Env var: `MONGODB_DATABASE`.
    pub mongodb_database: String,
    /// User collection (default "Users"). Env var: `USERS_COLLECTION`.
    pub users_collection: String,
    /// Role collection (default "Users"). Env var: `ROLES_COLLECTION`.
    pub roles_collection: String,
    /// Create indexes at startup (default true). Env var: `MANAGE_INDEXES`.
    pub manage_indexes: bool,
    /// TCP port for the HTTP server (default 3120). Env var: `SAMPLE_PORT`.
    pub sample_port: u16,
    /// Env var: `FACEBOOK_USERINFO_URL`.
    pub facebook_userinfo_url: String,
    /// Env var: `GOOGLE_USERINFO_URL`.
    pub google_userinfo_url: String,
    /// User-info request timeout in seconds (default 10). Env var:
    /// `USERINFO_TIMEOUT_SECS`.
    pub userinfo_timeout_secs: u64,
}

impl SampleConfig {
    pub fn from_env() -> Self {
        Self {
            mongodb_url: std::env::var("MONGODB_URL").expect("MONGODB_URL"),
            mongodb_database: var_or("MONGODB_DATABASE", "identity"),
            users_collection: var_or("USERS_COLLECTION", "Users"),
            roles_collection: var_or("ROLES_COLLECTION", "Users"),
            manage_indexes: std::env::var("MANAGE_INDEXES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            sample_port: std::env::var("SAMPLE_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3120),
            facebook_userinfo_url: var_or(
                "FACEBOOK_USERINFO_URL",
                ExternalProvider::Facebook.default_userinfo_url(),
            ),
            google_userinfo_url: var_or(
                "GOOGLE_USERINFO_URL",
                ExternalProvider::Google.default_userinfo_url(),
            ),
            userinfo_timeout_secs: std::env::var("USERINFO_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }

    pub fn mongo_options(&self) -> MongoDbOptions {
        let collection = |name: &str| CollectionOptions {
            collection_name: name.to_owned(),
            manage_indexes: self.manage_indexes,
        };
        MongoDbOptions::new(&self.mongodb_url, &self.mongodb_database)
            .with_user_collection(collection(&self.users_collection))
            .with_role_collection(collection(&self.roles_collection))
    }

    pub fn userinfo_timeout(&self) -> Duration {
        Duration::from_secs(self.userinfo_timeout_secs)
    }

    pub fn provider_endpoints(&self) -> ProviderEndpoints {
        ProviderEndpoints {
            facebook: self.facebook_userinfo_url.clone(),
            google: self.google_userinfo_url.clone(),
        }
    }
}

fn var_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_owned())
}
