use mongodb::bson::{Document, doc};
use mongodb::{Client, Collection, Database};
use tracing::{info, warn};

use identity_domain::{Role, User};

use crate::error::StoreError;
use crate::filter;
use crate::index::{role_indexes, user_indexes};
use crate::options::MongoDbOptions;

/// Resolves the user and role collections from one configured database.
///
/// Cloning is cheap: collections share the client's connection pool.
#[derive(Clone, Debug)]
pub struct MongoDbContext {
    database: Database,
    users: Collection<User>,
    roles: Collection<Role>,
    options: MongoDbOptions,
}

impl MongoDbContext {
    pub fn new(database: Database, options: MongoDbOptions) -> Self {
        if options.shares_collection() {
            warn!(
                collection = %options.user.collection_name,
                "users and roles share one collection"
            );
        }
        let users = database.collection::<User>(&options.user.collection_name);
        let roles = database.collection::<Role>(&options.role.collection_name);
        Self {
            database,
            users,
            roles,
            options,
        }
    }

    /// Build a client from `options.connection_string` and resolve the
    /// collections. Connection failures are returned as-is; there is no retry.
    pub async fn connect(options: MongoDbOptions) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(&options.connection_string).await?;
        let database = client.database(&options.database);
        Ok(Self::new(database, options))
    }

    pub fn users(&self) -> &Collection<User> {
        &self.users
    }

    pub fn roles(&self) -> &Collection<Role> {
        &self.roles
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn options(&self) -> &MongoDbOptions {
        &self.options
    }

    /// Restrict `filter` to user documents when roles live in the same
    /// collection.
    pub fn user_filter(&self, filter: Document) -> Document {
        if self.options.shares_collection() {
            filter::scoped(filter, filter::user_documents())
        } else {
            filter
        }
    }

    /// Restrict `filter` to role documents when users live in the same
    /// collection.
    pub fn role_filter(&self, filter: Document) -> Document {
        if self.options.shares_collection() {
            filter::scoped(filter, filter::role_documents())
        } else {
            filter
        }
    }

    /// Create the lookup indexes for each collection whose options ask for it.
    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        if self.options.user.manage_indexes {
            self.users.create_indexes(user_indexes()).await?;
            info!(collection = %self.users.name(), "user indexes ensured");
        }
        if self.options.role.manage_indexes {
            self.roles.create_indexes(role_indexes()).await?;
            info!(collection = %self.roles.name(), "role indexes ensured");
        }
        Ok(())
    }

    /// Round-trip a `ping` command; used by readiness checks.
    pub async fn ping(&self) -> Result<(), StoreError> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
