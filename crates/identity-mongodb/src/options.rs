use serde::Deserialize;

const DEFAULT_COLLECTION_NAME: &str = "Users";

/// Connection and collection settings, read once at startup.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MongoDbOptions {
    /// MongoDB connection string, e.g. `mongodb://localhost:27017`.
    pub connection_string: String,
    /// Database holding both collections.
    pub database: String,
    #[serde(default)]
    pub user: CollectionOptions,
    #[serde(default)]
    pub role: CollectionOptions,
}

/// Per-entity collection settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CollectionOptions {
    #[serde(default = "default_collection_name")]
    pub collection_name: String,
    /// Create the lookup indexes for this collection on startup.
    #[serde(default = "default_manage_indexes")]
    pub manage_indexes: bool,
}

fn default_collection_name() -> String {
    DEFAULT_COLLECTION_NAME.to_owned()
}

fn default_manage_indexes() -> bool {
    true
}

impl Default for CollectionOptions {
    fn default() -> Self {
        Self {
            collection_name: default_collection_name(),
            manage_indexes: default_manage_indexes(),
        }
    }
}

impl CollectionOptions {
    pub fn named(collection_name: impl Into<String>) -> Self {
        Self {
            collection_name: collection_name.into(),
            ..Self::default()
        }
    }
}

impl MongoDbOptions {
    pub fn new(connection_string: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            connection_string: connection_string.into(),
            database: database.into(),
            user: CollectionOptions::default(),
            role: CollectionOptions::default(),
        }
    }

    pub fn with_user_collection(mut self, user: CollectionOptions) -> Self {
        self.user = user;
        self
    }

    pub fn with_role_collection(mut self, role: CollectionOptions) -> Self {
        self.role = role;
        self
    }

    /// Users and roles end up in the same collection.
    pub fn shares_collection(&self) -> bool {
        self.user.collection_name == self.role.collection_name
    }
}
