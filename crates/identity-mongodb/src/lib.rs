//! MongoDB-backed user and role stores for an identity subsystem.
//!
//! [`MongoUserStore`] and [`MongoRoleStore`] implement the narrow capability
//! traits in [`store`]. Operations that take `&mut User` only touch the
//! object in memory; call [`store::UserStore::update`] to persist.

pub mod cancel;
pub mod context;
pub mod error;
pub mod filter;
pub mod index;
pub mod options;
pub mod registration;
pub mod role_store;
pub mod store;
pub mod user_store;

pub use context::MongoDbContext;
pub use error::StoreError;
pub use options::{CollectionOptions, MongoDbOptions};
pub use registration::IdentityStores;
pub use role_store::MongoRoleStore;
pub use tokio_util::sync::CancellationToken;
pub use user_store::MongoUserStore;
