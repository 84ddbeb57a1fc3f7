use tracing::{debug, info, warn};

use identity_domain::{User, UserClaim, UserLoginInfo, normalize};
use identity_mongodb::CancellationToken;
use identity_mongodb::store::{
    UserAuthenticationTokenStore, UserClaimStore, UserEmailStore, UserLoginStore,
};

use crate::domain::claims::{email_verified, provider_claims};
use crate::domain::provider::{CLAIM_EMAIL, CLAIM_NAME, CLAIM_NAME_IDENTIFIER, ExternalProvider};
use crate::domain::repository::UserInfoPort;
use crate::error::SampleError;

/// Name under which the provider access token is kept on the user.
pub const ACCESS_TOKEN_NAME: &str = "access_token";

/// User store capabilities an external sign-in needs.
pub trait ExternalLoginStore:
    UserLoginStore + UserEmailStore + UserClaimStore + UserAuthenticationTokenStore
{
}

impl<T> ExternalLoginStore for T where
    T: UserLoginStore + UserEmailStore + UserClaimStore + UserAuthenticationTokenStore
{
}

pub struct ExternalLoginInput {
    pub provider: ExternalProvider,
    pub access_token: String,
}

#[derive(Debug)]
pub struct ExternalLoginOutput {
    pub user: User,
    pub created: bool,
}

pub struct ExternalLoginUseCase<P: UserInfoPort, S: ExternalLoginStore> {
    pub userinfo: P,
    pub store: S,
}

impl<P: UserInfoPort, S: ExternalLoginStore> ExternalLoginUseCase<P, S> {
    /// Sign in with a provider access token.
    ///
    /// The user is resolved by linked login, then by email, and created if
    /// neither matches. An email match is only linked when the provider
    /// flags the address as verified. The login, the provider's claims and
    /// the access token are then attached and persisted.
    pub async fn execute(
        &self,
        input: ExternalLoginInput,
        cancel: &CancellationToken,
    ) -> Result<ExternalLoginOutput, SampleError> {
        if input.access_token.trim().is_empty() {
            return Err(SampleError::InvalidRequest("access token is empty"));
        }
        let provider = input.provider;
        let payload = self.userinfo.fetch(provider, &input.access_token).await?;
        let claims = provider_claims(provider, &payload);
        let verified = email_verified(provider, &payload);

        let provider_key =
            claim_value(&claims, CLAIM_NAME_IDENTIFIER).ok_or(SampleError::MissingProviderKey)?;
        let email = claim_value(&claims, CLAIM_EMAIL);

        let resolved = self
            .resolve(provider, provider_key, email, verified, cancel)
            .await?;
        let (mut user, created) = match resolved {
            Some(user) => (user, false),
            None => (new_user(provider, provider_key, email, verified, &claims), true),
        };

        let login = UserLoginInfo::new(
            provider.scheme(),
            provider_key,
            Some(provider.display_name().to_owned()),
        );
        self.store.add_login(&mut user, &login, cancel).await?;
        self.store.add_claims(&mut user, &claims, cancel).await?;
        self.store
            .set_token(
                &mut user,
                provider.scheme(),
                ACCESS_TOKEN_NAME,
                &input.access_token,
                cancel,
            )
            .await?;

        if created {
            self.store.create(&user, cancel).await?;
            info!(user_id = %user.id(), %provider, "user created from external login");
        } else {
            self.store.update(&user, cancel).await?;
            debug!(user_id = %user.id(), %provider, "external login refreshed");
        }
        Ok(ExternalLoginOutput { user, created })
    }

    async fn resolve(
        &self,
        provider: ExternalProvider,
        provider_key: &str,
        email: Option<&str>,
        verified: bool,
        cancel: &CancellationToken,
    ) -> Result<Option<User>, SampleError> {
        if let Some(user) = self
            .store
            .find_by_login(provider.scheme(), provider_key, cancel)
            .await?
        {
            return Ok(Some(user));
        }
        let Some(email) = email else {
            return Ok(None);
        };
        match self.store.find_by_email(&normalize(email), cancel).await? {
            Some(user) if verified => Ok(Some(user)),
            Some(owner) => {
                warn!(user_id = %owner.id(), %provider, "unverified email matches an existing user");
                Err(SampleError::UnverifiedEmail)
            }
            None => Ok(None),
        }
    }
}

fn claim_value<'a>(claims: &'a [UserClaim], claim_type: &str) -> Option<&'a str> {
    claims
        .iter()
        .find(|c| c.claim_type == claim_type)
        .map(|c| c.value.as_str())
}

/// The user name is the email when the provider shares one, otherwise
/// `<scheme>:<key>`.
fn new_user(
    provider: ExternalProvider,
    provider_key: &str,
    email: Option<&str>,
    email_confirmed: bool,
    claims: &[UserClaim],
) -> User {
    let user_name = email
        .map(str::to_owned)
        .unwrap_or_else(|| format!("{}:{provider_key}", provider.scheme()));
    let mut user = User::new();
    user.normalized_name = Some(normalize(&user_name));
    user.user_name = Some(user_name);
    user.name = claim_value(claims, CLAIM_NAME).map(str::to_owned);
    if let Some(email) = email {
        user.email = Some(email.to_owned());
        user.normalized_email = Some(normalize(email));
        user.email_confirmed = email_confirmed;
    }
    user
}
