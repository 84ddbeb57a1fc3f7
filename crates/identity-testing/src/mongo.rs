//! Throwaway databases on a live MongoDB server.
//!
//! Live tests call [`TestMongo::from_env`] and return early when it yields
//! `None`, so the suite passes on machines without a server.

use identity_mongodb::{CollectionOptions, IdentityStores, MongoDbContext, MongoDbOptions};
use mongodb::Client;
use uuid::Uuid;

/// Connection string of the server used by live tests.
pub const TEST_URL_ENV: &str = "IDENTITY_MONGODB_TEST_URL";

/// Nothing listens here; server selection gives up quickly.
const OFFLINE_URL: &str = "mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=200";

/// Stores on a client that never reaches a server. Lookups that need no
/// round trip still work; everything else fails with a database error.
pub async fn offline_stores() -> IdentityStores {
    let options = MongoDbOptions::new(OFFLINE_URL, "identity_offline")
        .with_role_collection(CollectionOptions::named("Roles"));
    let client = Client::with_uri_str(&options.connection_string)
        .await
        .expect("failed to build offline MongoDB client");
    let database = client.database(&options.database);
    IdentityStores::new(MongoDbContext::new(database, options))
}

/// Stores bound to a freshly named database.
pub struct TestMongo {
    stores: IdentityStores,
}

impl TestMongo {
    /// Users and roles in separate collections.
    pub async fn from_env() -> Option<Self> {
        Self::with_collections("Users", "Roles").await
    }

    /// Users and roles in the same collection.
    pub async fn shared_from_env() -> Option<Self> {
        Self::with_collections("Users", "Users").await
    }

    async fn with_collections(users: &str, roles: &str) -> Option<Self> {
        let Ok(url) = std::env::var(TEST_URL_ENV) else {
            tracing::warn!("{TEST_URL_ENV} not set; skipping live MongoDB test");
            return None;
        };
        let database = format!("identity_test_{}", Uuid::new_v4().simple());
        let options = MongoDbOptions::new(url, database)
            .with_user_collection(CollectionOptions::named(users))
            .with_role_collection(CollectionOptions::named(roles));
        let stores = IdentityStores::connect(options)
            .await
            .expect("failed to connect to test MongoDB");
        Some(Self { stores })
    }

    pub fn stores(&self) -> &IdentityStores {
        &self.stores
    }

    /// Drop the database. Call at the end of each test.
    pub async fn drop_database(self) {
        self.stores
            .context()
            .database()
            .drop()
            .await
            .expect("failed to drop test database");
    }
}
