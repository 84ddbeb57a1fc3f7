use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::Document;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use identity_domain::{User, UserClaim, UserId, UserLoginInfo};

use crate::cancel::{ensure_active, with_cancel};
use crate::context::MongoDbContext;
use crate::error::StoreError;
use crate::filter;
use crate::store::{
    QueryableUserStore, UserAuthenticationTokenStore, UserClaimStore, UserEmailStore,
    UserLockoutStore, UserLoginStore, UserPasswordStore, UserPhoneNumberStore, UserRoleStore,
    UserSecurityStampStore, UserStore, UserTwoFactorStore,
};

/// User store backed by the user collection of a [`MongoDbContext`].
///
/// Role membership checks read the role collection of the same context.
#[derive(Clone, Debug)]
pub struct MongoUserStore {
    context: MongoDbContext,
}

impl MongoUserStore {
    pub fn new(context: MongoDbContext) -> Self {
        Self { context }
    }

    fn collection(&self) -> &Collection<User> {
        self.context.users()
    }

    async fn find_one(
        &self,
        filter: Document,
        cancel: &CancellationToken,
    ) -> Result<Option<User>, StoreError> {
        let filter = self.context.user_filter(filter);
        with_cancel(cancel, self.collection().find_one(filter)).await
    }

    async fn find_many(
        &self,
        filter: Document,
        cancel: &CancellationToken,
    ) -> Result<Vec<User>, StoreError> {
        let users = self.collection();
        let filter = self.context.user_filter(filter);
        with_cancel(cancel, async move {
            let cursor = users.find(filter).await?;
            cursor.try_collect::<Vec<User>>().await
        })
        .await
    }
}

// ── Core ──────────────────────────────────────────────────────────────────────

impl UserStore for MongoUserStore {
    async fn create(&self, user: &User, cancel: &CancellationToken) -> Result<(), StoreError> {
        with_cancel(cancel, self.collection().insert_one(user)).await?;
        debug!(user_id = %user.id(), "user created");
        Ok(())
    }

    async fn delete(&self, user: &User, cancel: &CancellationToken) -> Result<(), StoreError> {
        let filter = self.context.user_filter(filter::by_id(user.id().0));
        let result = with_cancel(cancel, self.collection().delete_one(filter)).await?;
        debug!(user_id = %user.id(), deleted = result.deleted_count, "user deleted");
        Ok(())
    }

    async fn update(&self, user: &User, cancel: &CancellationToken) -> Result<(), StoreError> {
        let filter = self.context.user_filter(filter::by_id(user.id().0));
        let previous =
            with_cancel(cancel, self.collection().find_one_and_replace(filter, user)).await?;
        if previous.is_none() {
            warn!(user_id = %user.id(), "update matched no user document");
        }
        Ok(())
    }

    async fn find_by_id(
        &self,
        user_id: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<User>, StoreError> {
        let Ok(id) = user_id.parse::<UserId>() else {
            debug!(user_id, "user id is not an object id");
            ensure_active(cancel)?;
            return Ok(None);
        };
        self.find_one(filter::by_id(id.0), cancel).await
    }

    async fn find_by_name(
        &self,
        normalized_user_name: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<User>, StoreError> {
        self.find_one(filter::by_normalized_name(normalized_user_name), cancel)
            .await
    }

    async fn user_id(&self, user: &User, cancel: &CancellationToken) -> Result<String, StoreError> {
        ensure_active(cancel)?;
        Ok(user.id().to_hex())
    }

    async fn user_name(
        &self,
        user: &User,
        cancel: &CancellationToken,
    ) -> Result<Option<String>, StoreError> {
        ensure_active(cancel)?;
        Ok(user.user_name.clone())
    }

    async fn set_user_name(
        &self,
        user: &mut User,
        user_name: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        ensure_active(cancel)?;
        user.user_name = user_name.map(str::to_owned);
        Ok(())
    }

    async fn normalized_user_name(
        &self,
        user: &User,
        cancel: &CancellationToken,
    ) -> Result<Option<String>, StoreError> {
        ensure_active(cancel)?;
        Ok(user.normalized_name.clone())
    }

    async fn set_normalized_user_name(
        &self,
        user: &mut User,
        normalized_name: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        ensure_active(cancel)?;
        user.normalized_name = normalized_name.map(str::to_owned);
        Ok(())
    }
}

// ── Claims ────────────────────────────────────────────────────────────────────

impl UserClaimStore for MongoUserStore {
    async fn claims(
        &self,
        user: &User,
        cancel: &CancellationToken,
    ) -> Result<Vec<UserClaim>, StoreError> {
        ensure_active(cancel)?;
        Ok(user.claims.clone())
    }

    async fn add_claims(
        &self,
        user: &mut User,
        claims: &[UserClaim],
        cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        ensure_active(cancel)?;
        user.add_claims(claims.iter().cloned());
        Ok(())
    }

    async fn replace_claim(
        &self,
        user: &mut User,
        claim: &UserClaim,
        new_claim: &UserClaim,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        ensure_active(cancel)?;
        user.replace_claim(claim, new_claim.clone());
        Ok(())
    }

    async fn remove_claims(
        &self,
        user: &mut User,
        claims: &[UserClaim],
        cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        ensure_active(cancel)?;
        user.remove_claims(claims);
        Ok(())
    }

    async fn users_for_claim(
        &self,
        claim: &UserClaim,
        cancel: &CancellationToken,
    ) -> Result<Vec<User>, StoreError> {
        self.find_many(filter::by_claim(&claim.claim_type, &claim.value), cancel)
            .await
    }
}

// ── Logins ────────────────────────────────────────────────────────────────────

impl UserLoginStore for MongoUserStore {
    async fn add_login(
        &self,
        user: &mut User,
        login: &UserLoginInfo,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        ensure_active(cancel)?;
        user.add_login(login.clone());
        Ok(())
    }

    async fn remove_login(
        &self,
        user: &mut User,
        login_provider: &str,
        provider_key: &str,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        ensure_active(cancel)?;
        user.remove_login(login_provider, provider_key);
        Ok(())
    }

    async fn logins(
        &self,
        user: &User,
        cancel: &CancellationToken,
    ) -> Result<Vec<UserLoginInfo>, StoreError> {
        ensure_active(cancel)?;
        Ok(user.logins.clone())
    }

    async fn find_by_login(
        &self,
        login_provider: &str,
        provider_key: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<User>, StoreError> {
        self.find_one(filter::by_login(login_provider, provider_key), cancel)
            .await
    }
}

// ── Roles ─────────────────────────────────────────────────────────────────────

impl UserRoleStore for MongoUserStore {
    async fn add_to_role(
        &self,
        user: &mut User,
        normalized_role_name: &str,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        let filter = self
            .context
            .role_filter(filter::by_normalized_name(normalized_role_name));
        let role = with_cancel(cancel, self.context.roles().find_one(filter)).await?;
        if role.is_none() {
            return Err(StoreError::InvalidOperation(format!(
                "role '{normalized_role_name}' not found"
            )));
        }
        user.add_role(normalized_role_name);
        Ok(())
    }

    async fn remove_from_role(
        &self,
        user: &mut User,
        normalized_role_name: &str,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        ensure_active(cancel)?;
        user.remove_role(normalized_role_name);
        Ok(())
    }

    async fn roles(
        &self,
        user: &User,
        cancel: &CancellationToken,
    ) -> Result<Vec<String>, StoreError> {
        ensure_active(cancel)?;
        Ok(user.roles.clone())
    }

    async fn is_in_role(
        &self,
        user: &User,
        normalized_role_name: &str,
        cancel: &CancellationToken,
    ) -> Result<bool, StoreError> {
        ensure_active(cancel)?;
        Ok(user.is_in_role(normalized_role_name))
    }

    async fn users_in_role(
        &self,
        normalized_role_name: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<User>, StoreError> {
        self.find_many(filter::in_role(normalized_role_name), cancel)
            .await
    }
}

// ── Password / security stamp ─────────────────────────────────────────────────

impl UserPasswordStore for MongoUserStore {
    async fn set_password_hash(
        &self,
        user: &mut User,
        password_hash: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        ensure_active(cancel)?;
        user.password_hash = password_hash.map(str::to_owned);
        Ok(())
    }

    async fn password_hash(
        &self,
        user: &User,
        cancel: &CancellationToken,
    ) -> Result<Option<String>, StoreError> {
        ensure_active(cancel)?;
        Ok(user.password_hash.clone())
    }

    async fn has_password(
        &self,
        user: &User,
        cancel: &CancellationToken,
    ) -> Result<bool, StoreError> {
        ensure_active(cancel)?;
        Ok(user
            .password_hash
            .as_deref()
            .is_some_and(|hash| !hash.trim().is_empty()))
    }
}

impl UserSecurityStampStore for MongoUserStore {
    async fn set_security_stamp(
        &self,
        user: &mut User,
        stamp: &str,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        ensure_active(cancel)?;
        user.security_stamp = Some(stamp.to_owned());
        Ok(())
    }

    async fn security_stamp(
        &self,
        user: &User,
        cancel: &CancellationToken,
    ) -> Result<Option<String>, StoreError> {
        ensure_active(cancel)?;
        Ok(user.security_stamp.clone())
    }
}

// ── Email / phone ─────────────────────────────────────────────────────────────

impl UserEmailStore for MongoUserStore {
    async fn set_email(
        &self,
        user: &mut User,
        email: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        ensure_active(cancel)?;
        user.email = email.map(str::to_owned);
        Ok(())
    }

    async fn email(
        &self,
        user: &User,
        cancel: &CancellationToken,
    ) -> Result<Option<String>, StoreError> {
        ensure_active(cancel)?;
        Ok(user.email.clone())
    }

    async fn email_confirmed(
        &self,
        user: &User,
        cancel: &CancellationToken,
    ) -> Result<bool, StoreError> {
        ensure_active(cancel)?;
        Ok(user.email_confirmed)
    }

    async fn set_email_confirmed(
        &self,
        user: &mut User,
        confirmed: bool,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        ensure_active(cancel)?;
        user.email_confirmed = confirmed;
        Ok(())
    }

    async fn find_by_email(
        &self,
        normalized_email: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<User>, StoreError> {
        self.find_one(filter::by_normalized_email(normalized_email), cancel)
            .await
    }

    async fn normalized_email(
        &self,
        user: &User,
        cancel: &CancellationToken,
    ) -> Result<Option<String>, StoreError> {
        ensure_active(cancel)?;
        Ok(user.normalized_email.clone())
    }

    async fn set_normalized_email(
        &self,
        user: &mut User,
        normalized_email: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        ensure_active(cancel)?;
        user.normalized_email = normalized_email.map(str::to_owned);
        Ok(())
    }
}

impl UserPhoneNumberStore for MongoUserStore {
    async fn set_phone_number(
        &self,
        user: &mut User,
        phone_number: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        ensure_active(cancel)?;
        user.phone_number = phone_number.map(str::to_owned);
        Ok(())
    }

    async fn phone_number(
        &self,
        user: &User,
        cancel: &CancellationToken,
    ) -> Result<Option<String>, StoreError> {
        ensure_active(cancel)?;
        Ok(user.phone_number.clone())
    }

    async fn phone_number_confirmed(
        &self,
        user: &User,
        cancel: &CancellationToken,
    ) -> Result<bool, StoreError> {
        ensure_active(cancel)?;
        Ok(user.phone_number_confirmed)
    }

    async fn set_phone_number_confirmed(
        &self,
        user: &mut User,
        confirmed: bool,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        ensure_active(cancel)?;
        user.phone_number_confirmed = confirmed;
        Ok(())
    }
}

// ── Lockout / two-factor ──────────────────────────────────────────────────────

impl UserLockoutStore for MongoUserStore {
    async fn lockout_end_date(
        &self,
        user: &User,
        cancel: &CancellationToken,
    ) -> Result<Option<DateTime<Utc>>, StoreError> {
        ensure_active(cancel)?;
        Ok(user.lockout_end_date)
    }

    async fn set_lockout_end_date(
        &self,
        user: &mut User,
        lockout_end: Option<DateTime<Utc>>,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        ensure_active(cancel)?;
        user.lockout_end_date = lockout_end;
        Ok(())
    }

    async fn increment_access_failed_count(
        &self,
        user: &mut User,
        cancel: &CancellationToken,
    ) -> Result<i32, StoreError> {
        ensure_active(cancel)?;
        user.access_failed_count = user.access_failed_count.saturating_add(1);
        Ok(user.access_failed_count)
    }

    async fn reset_access_failed_count(
        &self,
        user: &mut User,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        ensure_active(cancel)?;
        user.access_failed_count = 0;
        Ok(())
    }

    async fn access_failed_count(
        &self,
        user: &User,
        cancel: &CancellationToken,
    ) -> Result<i32, StoreError> {
        ensure_active(cancel)?;
        Ok(user.access_failed_count)
    }

    async fn lockout_enabled(
        &self,
        user: &User,
        cancel: &CancellationToken,
    ) -> Result<bool, StoreError> {
        ensure_active(cancel)?;
        Ok(user.lockout_enabled)
    }

    async fn set_lockout_enabled(
        &self,
        user: &mut User,
        enabled: bool,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        ensure_active(cancel)?;
        user.lockout_enabled = enabled;
        Ok(())
    }
}

impl UserTwoFactorStore for MongoUserStore {
    async fn set_two_factor_enabled(
        &self,
        user: &mut User,
        enabled: bool,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        ensure_active(cancel)?;
        user.two_factor_enabled = enabled;
        Ok(())
    }

    async fn two_factor_enabled(
        &self,
        user: &User,
        cancel: &CancellationToken,
    ) -> Result<bool, StoreError> {
        ensure_active(cancel)?;
        Ok(user.two_factor_enabled)
    }
}

// ── Auth tokens ───────────────────────────────────────────────────────────────

impl UserAuthenticationTokenStore for MongoUserStore {
    async fn set_token(
        &self,
        user: &mut User,
        login_provider: &str,
        name: &str,
        value: &str,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        ensure_active(cancel)?;
        user.set_token(login_provider, name, value);
        Ok(())
    }

    async fn remove_token(
        &self,
        user: &mut User,
        login_provider: &str,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        ensure_active(cancel)?;
        user.remove_token(login_provider, name);
        Ok(())
    }

    async fn token(
        &self,
        user: &User,
        login_provider: &str,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<String>, StoreError> {
        ensure_active(cancel)?;
        Ok(user.token(login_provider, name).map(str::to_owned))
    }
}

impl QueryableUserStore for MongoUserStore {
    async fn users(&self, cancel: &CancellationToken) -> Result<Vec<User>, StoreError> {
        self.find_many(filter::all(), cancel).await
    }
}
