use std::sync::{Arc, Mutex};

use serde_json::Value;

use identity_domain::{Role, User, UserClaim, UserLoginInfo};
use identity_mongodb::store::{
    RoleStore, UserAuthenticationTokenStore, UserClaimStore, UserEmailStore, UserLoginStore,
    UserRoleStore, UserStore,
};
use identity_mongodb::{CancellationToken, StoreError};
use identity_sample::domain::provider::ExternalProvider;
use identity_sample::domain::repository::UserInfoPort;
use identity_sample::error::SampleError;

// ── MockUserInfo ─────────────────────────────────────────────────────────────

pub struct MockUserInfo {
    response: Result<Value, u16>,
    pub calls: Arc<Mutex<Vec<(ExternalProvider, String)>>>,
}

impl MockUserInfo {
    pub fn payload(payload: Value) -> Self {
        Self {
            response: Ok(payload),
            calls: Arc::new(Mutex::new(vec![])),
        }
    }

    /// Every fetch fails as if the provider answered with `status`.
    pub fn rejecting(status: u16) -> Self {
        Self {
            response: Err(status),
            calls: Arc::new(Mutex::new(vec![])),
        }
    }
}

impl UserInfoPort for MockUserInfo {
    async fn fetch(
        &self,
        provider: ExternalProvider,
        access_token: &str,
    ) -> Result<Value, SampleError> {
        self.calls
            .lock()
            .unwrap()
            .push((provider, access_token.to_owned()));
        match &self.response {
            Ok(payload) => Ok(payload.clone()),
            Err(status) => Err(SampleError::UserInfoUnavailable {
                provider: provider.display_name(),
                status: *status,
            }),
        }
    }
}

// ── MemoryUserStore ──────────────────────────────────────────────────────────

/// User store over a shared vector. `roles` lists the normalized role names
/// that exist.
#[derive(Clone, Default)]
pub struct MemoryUserStore {
    pub users: Arc<Mutex<Vec<User>>>,
    pub roles: Vec<String>,
}

impl MemoryUserStore {
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
            roles: vec![],
        }
    }

    pub fn with_roles(mut self, roles: &[&str]) -> Self {
        self.roles = roles.iter().map(|r| (*r).to_owned()).collect();
        self
    }

    pub fn snapshot(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }

    fn find(&self, pred: impl Fn(&User) -> bool) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| pred(u)).cloned()
    }
}

fn guard(cancel: &CancellationToken) -> Result<(), StoreError> {
    if cancel.is_cancelled() {
        return Err(StoreError::Cancelled);
    }
    Ok(())
}

impl UserStore for MemoryUserStore {
    async fn create(&self, user: &User, cancel: &CancellationToken) -> Result<(), StoreError> {
        guard(cancel)?;
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn delete(&self, user: &User, cancel: &CancellationToken) -> Result<(), StoreError> {
        guard(cancel)?;
        self.users.lock().unwrap().retain(|u| u.id() != user.id());
        Ok(())
    }

    async fn update(&self, user: &User, cancel: &CancellationToken) -> Result<(), StoreError> {
        guard(cancel)?;
        let mut users = self.users.lock().unwrap();
        if let Some(stored) = users.iter_mut().find(|u| u.id() == user.id()) {
            *stored = user.clone();
        }
        Ok(())
    }

    async fn find_by_id(
        &self,
        user_id: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<User>, StoreError> {
        guard(cancel)?;
        Ok(self.find(|u| u.id().to_hex() == user_id))
    }

    async fn find_by_name(
        &self,
        normalized_user_name: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<User>, StoreError> {
        guard(cancel)?;
        Ok(self.find(|u| u.normalized_name.as_deref() == Some(normalized_user_name)))
    }

    async fn user_id(&self, user: &User, _cancel: &CancellationToken) -> Result<String, StoreError> {
        Ok(user.id().to_hex())
    }

    async fn user_name(
        &self,
        user: &User,
        _cancel: &CancellationToken,
    ) -> Result<Option<String>, StoreError> {
        Ok(user.user_name.clone())
    }

    async fn set_user_name(
        &self,
        user: &mut User,
        user_name: Option<&str>,
        _cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        user.user_name = user_name.map(str::to_owned);
        Ok(())
    }

    async fn normalized_user_name(
        &self,
        user: &User,
        _cancel: &CancellationToken,
    ) -> Result<Option<String>, StoreError> {
        Ok(user.normalized_name.clone())
    }

    async fn set_normalized_user_name(
        &self,
        user: &mut User,
        normalized_name: Option<&str>,
        _cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        user.normalized_name = normalized_name.map(str::to_owned);
        Ok(())
    }
}

impl UserLoginStore for MemoryUserStore {
    async fn add_login(
        &self,
        user: &mut User,
        login: &UserLoginInfo,
        _cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        user.add_login(login.clone());
        Ok(())
    }

    async fn remove_login(
        &self,
        user: &mut User,
        login_provider: &str,
        provider_key: &str,
        _cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        user.remove_login(login_provider, provider_key);
        Ok(())
    }

    async fn logins(
        &self,
        user: &User,
        _cancel: &CancellationToken,
    ) -> Result<Vec<UserLoginInfo>, StoreError> {
        Ok(user.logins.clone())
    }

    async fn find_by_login(
        &self,
        login_provider: &str,
        provider_key: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<User>, StoreError> {
        guard(cancel)?;
        Ok(self.find(|u| {
            u.logins
                .iter()
                .any(|l| l.login_provider == login_provider && l.provider_key == provider_key)
        }))
    }
}

impl UserEmailStore for MemoryUserStore {
    async fn set_email(
        &self,
        user: &mut User,
        email: Option<&str>,
        _cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        user.email = email.map(str::to_owned);
        Ok(())
    }

    async fn email(
        &self,
        user: &User,
        _cancel: &CancellationToken,
    ) -> Result<Option<String>, StoreError> {
        Ok(user.email.clone())
    }

    async fn email_confirmed(
        &self,
        user: &User,
        _cancel: &CancellationToken,
    ) -> Result<bool, StoreError> {
        Ok(user.email_confirmed)
    }

    async fn set_email_confirmed(
        &self,
        user: &mut User,
        confirmed: bool,
        _cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        user.email_confirmed = confirmed;
        Ok(())
    }

    async fn find_by_email(
        &self,
        normalized_email: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<User>, StoreError> {
        guard(cancel)?;
        Ok(self.find(|u| u.normalized_email.as_deref() == Some(normalized_email)))
    }

    async fn normalized_email(
        &self,
        user: &User,
        _cancel: &CancellationToken,
    ) -> Result<Option<String>, StoreError> {
        Ok(user.normalized_email.clone())
    }

    async fn set_normalized_email(
        &self,
        user: &mut User,
        normalized_email: Option<&str>,
        _cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        user.normalized_email = normalized_email.map(str::to_owned);
        Ok(())
    }
}

impl UserClaimStore for MemoryUserStore {
    async fn claims(
        &self,
        user: &User,
        _cancel: &CancellationToken,
    ) -> Result<Vec<UserClaim>, StoreError> {
        Ok(user.claims.clone())
    }

    async fn add_claims(
        &self,
        user: &mut User,
        claims: &[UserClaim],
        _cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        user.add_claims(claims.iter().cloned());
        Ok(())
    }

    async fn replace_claim(
        &self,
        user: &mut User,
        claim: &UserClaim,
        new_claim: &UserClaim,
        _cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        user.replace_claim(claim, new_claim.clone());
        Ok(())
    }

    async fn remove_claims(
        &self,
        user: &mut User,
        claims: &[UserClaim],
        _cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        user.remove_claims(claims);
        Ok(())
    }

    async fn users_for_claim(
        &self,
        claim: &UserClaim,
        cancel: &CancellationToken,
    ) -> Result<Vec<User>, StoreError> {
        guard(cancel)?;
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.claims.iter().any(|c| c.matches(claim)))
            .cloned()
            .collect())
    }
}

impl UserAuthenticationTokenStore for MemoryUserStore {
    async fn set_token(
        &self,
        user: &mut User,
        login_provider: &str,
        name: &str,
        value: &str,
        _cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        user.set_token(login_provider, name, value);
        Ok(())
    }

    async fn remove_token(
        &self,
        user: &mut User,
        login_provider: &str,
        name: &str,
        _cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        user.remove_token(login_provider, name);
        Ok(())
    }

    async fn token(
        &self,
        user: &User,
        login_provider: &str,
        name: &str,
        _cancel: &CancellationToken,
    ) -> Result<Option<String>, StoreError> {
        Ok(user.token(login_provider, name).map(str::to_owned))
    }
}

impl UserRoleStore for MemoryUserStore {
    async fn add_to_role(
        &self,
        user: &mut User,
        normalized_role_name: &str,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        guard(cancel)?;
        if !self.roles.iter().any(|r| r == normalized_role_name) {
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
        _cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        user.remove_role(normalized_role_name);
        Ok(())
    }

    async fn roles(
        &self,
        user: &User,
        _cancel: &CancellationToken,
    ) -> Result<Vec<String>, StoreError> {
        Ok(user.roles.clone())
    }

    async fn is_in_role(
        &self,
        user: &User,
        normalized_role_name: &str,
        _cancel: &CancellationToken,
    ) -> Result<bool, StoreError> {
        Ok(user.is_in_role(normalized_role_name))
    }

    async fn users_in_role(
        &self,
        normalized_role_name: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<User>, StoreError> {
        guard(cancel)?;
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.is_in_role(normalized_role_name))
            .cloned()
            .collect())
    }
}

// ── MemoryRoleStore ──────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MemoryRoleStore {
    pub roles: Arc<Mutex<Vec<Role>>>,
}

impl MemoryRoleStore {
    pub fn with_roles(roles: Vec<Role>) -> Self {
        Self {
            roles: Arc::new(Mutex::new(roles)),
        }
    }

    pub fn snapshot(&self) -> Vec<Role> {
        self.roles.lock().unwrap().clone()
    }
}

impl RoleStore for MemoryRoleStore {
    async fn create(&self, role: &Role, cancel: &CancellationToken) -> Result<(), StoreError> {
        guard(cancel)?;
        self.roles.lock().unwrap().push(role.clone());
        Ok(())
    }

    async fn delete(&self, role: &Role, _cancel: &CancellationToken) -> Result<(), StoreError> {
        self.roles.lock().unwrap().retain(|r| r.id() != role.id());
        Ok(())
    }

    async fn update(&self, role: &Role, _cancel: &CancellationToken) -> Result<(), StoreError> {
        let mut roles = self.roles.lock().unwrap();
        if let Some(stored) = roles.iter_mut().find(|r| r.id() == role.id()) {
            *stored = role.clone();
        }
        Ok(())
    }

    async fn find_by_id(
        &self,
        _role_id: &str,
        _cancel: &CancellationToken,
    ) -> Result<Option<Role>, StoreError> {
        Err(StoreError::NotSupported("find role by id"))
    }

    async fn find_by_name(
        &self,
        normalized_role_name: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<Role>, StoreError> {
        guard(cancel)?;
        Ok(self
            .roles
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.normalized_name.as_deref() == Some(normalized_role_name))
            .cloned())
    }

    async fn role_id(&self, role: &Role, _cancel: &CancellationToken) -> Result<String, StoreError> {
        Ok(role.id().to_hex())
    }

    async fn role_name(
        &self,
        role: &Role,
        _cancel: &CancellationToken,
    ) -> Result<Option<String>, StoreError> {
        Ok(role.name.clone())
    }

    async fn set_role_name(
        &self,
        role: &mut Role,
        role_name: Option<&str>,
        _cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        role.name = role_name.map(str::to_owned);
        Ok(())
    }

    async fn normalized_role_name(
        &self,
        role: &Role,
        _cancel: &CancellationToken,
    ) -> Result<Option<String>, StoreError> {
        Ok(role.normalized_name.clone())
    }

    async fn set_normalized_role_name(
        &self,
        role: &mut Role,
        normalized_name: Option<&str>,
        _cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        role.normalized_name = normalized_name.map(str::to_owned);
        Ok(())
    }
}
