#![allow(async_fn_in_trait)]

use serde_json::Value;

use crate::domain::provider::ExternalProvider;
use crate::error::SampleError;

/// Back-channel to a provider's user-info endpoint.
pub trait UserInfoPort: Send + Sync {
    /// Fetch the signed-in user's profile with the provider access token.
    async fn fetch(
        &self,
        provider: ExternalProvider,
        access_token: &str,
    ) -> Result<Value, SampleError>;
}
