//! User entity and its embedded-collection helpers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::claim::UserClaim;
use crate::id::UserId;
use crate::login::UserLoginInfo;
use crate::token::AuthToken;

/// A user account as persisted in the user collection.
///
/// Roles, external logins, claims and auth tokens are embedded in the
/// document. The identifier is assigned once by [`User::new`] and can only
/// be read afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    #[serde(rename = "_id")]
    id: UserId,

    pub user_name: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Normalized user name, used by name lookups.
    pub normalized_name: Option<String>,

    pub email_confirmed: bool,
    pub email: Option<String>,
    pub normalized_email: Option<String>,
    pub phone_number: Option<String>,
    pub phone_number_confirmed: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,

    pub security_stamp: Option<String>,
    pub lockout_end_date: Option<DateTime<Utc>>,
    pub access_failed_count: i32,
    pub lockout_enabled: bool,
    pub two_factor_enabled: bool,

    #[serde(default)]
    pub claims: Vec<UserClaim>,
    #[serde(default)]
    pub logins: Vec<UserLoginInfo>,
    /// Normalized names of the roles the user belongs to.
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub auth_tokens: Vec<AuthToken>,
}

impl Default for User {
    fn default() -> Self {
        Self::new()
    }
}

impl User {
    pub fn new() -> Self {
        Self {
            id: UserId::generate(),
            user_name: None,
            name: None,
            normalized_name: None,
            email_confirmed: false,
            email: None,
            normalized_email: None,
            phone_number: None,
            phone_number_confirmed: false,
            password_hash: None,
            security_stamp: None,
            lockout_end_date: None,
            access_failed_count: 0,
            lockout_enabled: false,
            two_factor_enabled: false,
            claims: Vec::new(),
            logins: Vec::new(),
            roles: Vec::new(),
            auth_tokens: Vec::new(),
        }
    }

    pub fn with_user_name(user_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user_name: Some(user_name.into()),
            email: Some(email.into()),
            ..Self::new()
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    // ── Roles ───────────────────────────────────────────────────────────────

    pub fn add_role(&mut self, role: &str) {
        if !self.is_in_role(role) {
            self.roles.push(role.to_owned());
        }
    }

    pub fn remove_role(&mut self, role: &str) {
        self.roles.retain(|r| r != role);
    }

    pub fn remove_roles<'a>(&mut self, roles: impl IntoIterator<Item = &'a str>) {
        for role in roles {
            self.remove_role(role);
        }
    }

    pub fn is_in_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    // ── Claims ──────────────────────────────────────────────────────────────

    pub fn add_claims(&mut self, claims: impl IntoIterator<Item = UserClaim>) {
        for claim in claims {
            self.add_claim(claim);
        }
    }

    /// Adds `claim` unless an entry with the same `(type, value)` exists.
    pub fn add_claim(&mut self, claim: UserClaim) {
        if !self.claims.iter().any(|c| c.matches(&claim)) {
            self.claims.push(claim);
        }
    }

    /// Replaces every entry matching `old` with a single `new` entry.
    /// Does nothing when `old` is not present.
    pub fn replace_claim(&mut self, old: &UserClaim, new: UserClaim) {
        let before = self.claims.len();
        self.claims.retain(|c| !c.matches(old));
        if self.claims.len() != before {
            self.add_claim(new);
        }
    }

    pub fn remove_claims<'a>(&mut self, claims: impl IntoIterator<Item = &'a UserClaim>) {
        for claim in claims {
            self.claims.retain(|c| !c.matches(claim));
        }
    }

    // ── Logins ──────────────────────────────────────────────────────────────

    pub fn add_logins(&mut self, logins: impl IntoIterator<Item = UserLoginInfo>) {
        for login in logins {
            self.add_login(login);
        }
    }

    /// Adds `login`, keyed by provider name. When the provider is already
    /// linked only its display name is overwritten; the key is kept.
    pub fn add_login(&mut self, login: UserLoginInfo) {
        match self
            .logins
            .iter_mut()
            .find(|l| l.login_provider == login.login_provider)
        {
            Some(existing) => existing.provider_display_name = login.provider_display_name,
            None => self.logins.push(login),
        }
    }

    pub fn remove_login(&mut self, login_provider: &str, provider_key: &str) {
        self.logins
            .retain(|l| !(l.login_provider == login_provider && l.provider_key == provider_key));
    }

    pub fn remove_provider_logins(&mut self, login_provider: &str) {
        self.logins.retain(|l| l.login_provider != login_provider);
    }

    // ── Auth tokens ─────────────────────────────────────────────────────────

    /// Adds `token`, or overwrites the value of the entry with the same
    /// `(provider, name)`.
    pub fn add_token(&mut self, token: AuthToken) {
        match self
            .auth_tokens
            .iter_mut()
            .find(|t| t.is_keyed(&token.login_provider, &token.name))
        {
            Some(existing) => existing.token = token.token,
            None => self.auth_tokens.push(token),
        }
    }

    pub fn set_token(&mut self, login_provider: &str, name: &str, value: &str) {
        self.add_token(AuthToken::new(login_provider, name, value));
    }

    pub fn token(&self, login_provider: &str, name: &str) -> Option<&str> {
        self.auth_tokens
            .iter()
            .find(|t| t.is_keyed(login_provider, name))
            .map(|t| t.token.as_str())
    }

    pub fn remove_token(&mut self, login_provider: &str, name: &str) {
        self.auth_tokens.retain(|t| !t.is_keyed(login_provider, name));
    }
}
