#![allow(async_fn_in_trait)]

//! Capability traits the identity subsystem expects from its stores.
//!
//! Every method takes a [`CancellationToken`]. Methods taking `&mut User` /
//! `&mut Role` change only the object passed in; nothing is written until
//! the caller invokes `update`. Accessors are async only so that all
//! capabilities share one calling convention.

use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;

use identity_domain::{Role, User, UserClaim, UserLoginInfo};

use crate::error::StoreError;

/// Core persistence for users.
pub trait UserStore: Send + Sync {
    /// Insert the full document.
    async fn create(&self, user: &User, cancel: &CancellationToken) -> Result<(), StoreError>;

    /// Remove the document with the user's id. Zero matches is success.
    async fn delete(&self, user: &User, cancel: &CancellationToken) -> Result<(), StoreError>;

    /// Replace the stored document with the in-memory state, last writer wins.
    async fn update(&self, user: &User, cancel: &CancellationToken) -> Result<(), StoreError>;

    async fn find_by_id(
        &self,
        user_id: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<User>, StoreError>;

    async fn find_by_name(
        &self,
        normalized_user_name: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<User>, StoreError>;

    async fn user_id(&self, user: &User, cancel: &CancellationToken) -> Result<String, StoreError>;

    async fn user_name(
        &self,
        user: &User,
        cancel: &CancellationToken,
    ) -> Result<Option<String>, StoreError>;

    async fn set_user_name(
        &self,
        user: &mut User,
        user_name: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError>;

    async fn normalized_user_name(
        &self,
        user: &User,
        cancel: &CancellationToken,
    ) -> Result<Option<String>, StoreError>;

    async fn set_normalized_user_name(
        &self,
        user: &mut User,
        normalized_name: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError>;
}

pub trait UserClaimStore: UserStore {
    async fn claims(
        &self,
        user: &User,
        cancel: &CancellationToken,
    ) -> Result<Vec<UserClaim>, StoreError>;

    async fn add_claims(
        &self,
        user: &mut User,
        claims: &[UserClaim],
        cancel: &CancellationToken,
    ) -> Result<(), StoreError>;

    async fn replace_claim(
        &self,
        user: &mut User,
        claim: &UserClaim,
        new_claim: &UserClaim,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError>;

    async fn remove_claims(
        &self,
        user: &mut User,
        claims: &[UserClaim],
        cancel: &CancellationToken,
    ) -> Result<(), StoreError>;

    /// Every user holding `claim`. Not paged.
    async fn users_for_claim(
        &self,
        claim: &UserClaim,
        cancel: &CancellationToken,
    ) -> Result<Vec<User>, StoreError>;
}

pub trait UserLoginStore: UserStore {
    async fn add_login(
        &self,
        user: &mut User,
        login: &UserLoginInfo,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError>;

    async fn remove_login(
        &self,
        user: &mut User,
        login_provider: &str,
        provider_key: &str,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError>;

    async fn logins(
        &self,
        user: &User,
        cancel: &CancellationToken,
    ) -> Result<Vec<UserLoginInfo>, StoreError>;

    /// The user linked to this provider account; provider and key must both
    /// match.
    async fn find_by_login(
        &self,
        login_provider: &str,
        provider_key: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<User>, StoreError>;
}

pub trait UserRoleStore: UserStore {
    /// Fails with [`StoreError::InvalidOperation`] when no role has this
    /// normalized name.
    async fn add_to_role(
        &self,
        user: &mut User,
        normalized_role_name: &str,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError>;

    async fn remove_from_role(
        &self,
        user: &mut User,
        normalized_role_name: &str,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError>;

    async fn roles(&self, user: &User, cancel: &CancellationToken)
    -> Result<Vec<String>, StoreError>;

    async fn is_in_role(
        &self,
        user: &User,
        normalized_role_name: &str,
        cancel: &CancellationToken,
    ) -> Result<bool, StoreError>;

    /// Every user whose role list contains the name. Not paged.
    async fn users_in_role(
        &self,
        normalized_role_name: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<User>, StoreError>;
}

pub trait UserPasswordStore: UserStore {
    async fn set_password_hash(
        &self,
        user: &mut User,
        password_hash: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError>;

    async fn password_hash(
        &self,
        user: &User,
        cancel: &CancellationToken,
    ) -> Result<Option<String>, StoreError>;

    async fn has_password(&self, user: &User, cancel: &CancellationToken)
    -> Result<bool, StoreError>;
}

pub trait UserSecurityStampStore: UserStore {
    async fn set_security_stamp(
        &self,
        user: &mut User,
        stamp: &str,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError>;

    async fn security_stamp(
        &self,
        user: &User,
        cancel: &CancellationToken,
    ) -> Result<Option<String>, StoreError>;
}

pub trait UserEmailStore: UserStore {
    async fn set_email(
        &self,
        user: &mut User,
        email: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError>;

    async fn email(
        &self,
        user: &User,
        cancel: &CancellationToken,
    ) -> Result<Option<String>, StoreError>;

    async fn email_confirmed(
        &self,
        user: &User,
        cancel: &CancellationToken,
    ) -> Result<bool, StoreError>;

    async fn set_email_confirmed(
        &self,
        user: &mut User,
        confirmed: bool,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError>;

    async fn find_by_email(
        &self,
        normalized_email: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<User>, StoreError>;

    async fn normalized_email(
        &self,
        user: &User,
        cancel: &CancellationToken,
    ) -> Result<Option<String>, StoreError>;

    async fn set_normalized_email(
        &self,
        user: &mut User,
        normalized_email: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError>;
}

pub trait UserLockoutStore: UserStore {
    async fn lockout_end_date(
        &self,
        user: &User,
        cancel: &CancellationToken,
    ) -> Result<Option<DateTime<Utc>>, StoreError>;

    async fn set_lockout_end_date(
        &self,
        user: &mut User,
        lockout_end: Option<DateTime<Utc>>,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError>;

    /// Returns the count after incrementing.
    async fn increment_access_failed_count(
        &self,
        user: &mut User,
        cancel: &CancellationToken,
    ) -> Result<i32, StoreError>;

    async fn reset_access_failed_count(
        &self,
        user: &mut User,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError>;

    async fn access_failed_count(
        &self,
        user: &User,
        cancel: &CancellationToken,
    ) -> Result<i32, StoreError>;

    async fn lockout_enabled(
        &self,
        user: &User,
        cancel: &CancellationToken,
    ) -> Result<bool, StoreError>;

    async fn set_lockout_enabled(
        &self,
        user: &mut User,
        enabled: bool,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError>;
}

pub trait UserPhoneNumberStore: UserStore {
    async fn set_phone_number(
        &self,
        user: &mut User,
        phone_number: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError>;

    async fn phone_number(
        &self,
        user: &User,
        cancel: &CancellationToken,
    ) -> Result<Option<String>, StoreError>;

    async fn phone_number_confirmed(
        &self,
        user: &User,
        cancel: &CancellationToken,
    ) -> Result<bool, StoreError>;

    async fn set_phone_number_confirmed(
        &self,
        user: &mut User,
        confirmed: bool,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError>;
}

pub trait UserTwoFactorStore: UserStore {
    async fn set_two_factor_enabled(
        &self,
        user: &mut User,
        enabled: bool,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError>;

    async fn two_factor_enabled(
        &self,
        user: &User,
        cancel: &CancellationToken,
    ) -> Result<bool, StoreError>;
}

pub trait UserAuthenticationTokenStore: UserStore {
    /// Set the token keyed by `(login_provider, name)`, replacing any
    /// previous value.
    async fn set_token(
        &self,
        user: &mut User,
        login_provider: &str,
        name: &str,
        value: &str,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError>;

    async fn remove_token(
        &self,
        user: &mut User,
        login_provider: &str,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError>;

    async fn token(
        &self,
        user: &User,
        login_provider: &str,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<String>, StoreError>;
}

pub trait QueryableUserStore: UserStore {
    /// Every user in the collection.
    async fn users(&self, cancel: &CancellationToken) -> Result<Vec<User>, StoreError>;
}

/// Core persistence for roles.
pub trait RoleStore: Send + Sync {
    async fn create(&self, role: &Role, cancel: &CancellationToken) -> Result<(), StoreError>;

    async fn delete(&self, role: &Role, cancel: &CancellationToken) -> Result<(), StoreError>;

    /// Unconditional replace; the concurrency stamp is stored, not checked.
    async fn update(&self, role: &Role, cancel: &CancellationToken) -> Result<(), StoreError>;

    async fn find_by_id(
        &self,
        role_id: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<Role>, StoreError>;

    async fn find_by_name(
        &self,
        normalized_role_name: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<Role>, StoreError>;

    async fn role_id(&self, role: &Role, cancel: &CancellationToken) -> Result<String, StoreError>;

    async fn role_name(
        &self,
        role: &Role,
        cancel: &CancellationToken,
    ) -> Result<Option<String>, StoreError>;

    async fn set_role_name(
        &self,
        role: &mut Role,
        role_name: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError>;

    async fn normalized_role_name(
        &self,
        role: &Role,
        cancel: &CancellationToken,
    ) -> Result<Option<String>, StoreError>;

    async fn set_normalized_role_name(
        &self,
        role: &mut Role,
        normalized_name: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError>;
}

pub trait QueryableRoleStore: RoleStore {
    async fn roles(&self, cancel: &CancellationToken) -> Result<Vec<Role>, StoreError>;
}
