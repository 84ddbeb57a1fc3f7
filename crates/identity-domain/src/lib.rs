//! Entity models persisted by the identity store.
//!
//! This crate contains only plain data holders and their in-memory list
//! helpers. Nothing here talks to the database; persistence lives in
//! `identity-mongodb`.

pub mod claim;
pub mod id;
pub mod login;
pub mod normalize;
pub mod role;
pub mod token;
pub mod user;

pub use claim::UserClaim;
pub use id::{RoleId, UserId};
pub use login::UserLoginInfo;
pub use normalize::normalize;
pub use role::Role;
pub use token::AuthToken;
pub use user::User;
