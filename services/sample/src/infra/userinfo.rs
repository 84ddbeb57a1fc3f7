use std::time::Duration;

use anyhow::Context as _;
use serde_json::Value;
use tracing::warn;

use crate::domain::provider::ExternalProvider;
use crate::domain::repository::UserInfoPort;
use crate::error::SampleError;

/// User-info endpoint per provider.
#[derive(Debug, Clone)]
pub struct ProviderEndpoints {
    pub facebook: String,
    pub google: String,
}

impl ProviderEndpoints {
    pub fn url_for(&self, provider: ExternalProvider) -> &str {
        match provider {
            ExternalProvider::Facebook => &self.facebook,
            ExternalProvider::Google => &self.google,
        }
    }
}

impl Default for ProviderEndpoints {
    fn default() -> Self {
        Self {
            facebook: ExternalProvider::Facebook.default_userinfo_url().to_owned(),
            google: ExternalProvider::Google.default_userinfo_url().to_owned(),
        }
    }
}

/// `reqwest` client implementing `UserInfoPort` with bearer-token GETs.
#[derive(Clone)]
pub struct HttpUserInfoClient {
    client: reqwest::Client,
    endpoints: ProviderEndpoints,
}

impl HttpUserInfoClient {
    /// Every user-info request, connect through body, is bounded by `timeout`.
    pub fn new(endpoints: ProviderEndpoints, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("build user info HTTP client")?;
        Ok(Self { client, endpoints })
    }
}

impl UserInfoPort for HttpUserInfoClient {
    async fn fetch(
        &self,
        provider: ExternalProvider,
        access_token: &str,
    ) -> Result<Value, SampleError> {
        let response = self
            .client
            .get(self.endpoints.url_for(provider))
            .bearer_auth(access_token)
            .send()
            .await
            .with_context(|| format!("GET {} user info", provider.display_name()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%provider, status = status.as_u16(), "user info request rejected");
            return Err(SampleError::UserInfoUnavailable {
                provider: provider.display_name(),
                status: status.as_u16(),
            });
        }

        let payload = response
            .json::<Value>()
            .await
            .context("decode user info payload")?;
        Ok(payload)
    }
}
