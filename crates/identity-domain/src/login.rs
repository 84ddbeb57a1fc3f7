use serde::{Deserialize, Serialize};

/// Linkage between a user and an external authentication provider account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserLoginInfo {
    /// Provider scheme name, e.g. `"facebook"`. Unique within a user.
    pub login_provider: String,
    /// The account key issued by the provider.
    pub provider_key: String,
    pub provider_display_name: Option<String>,
}

impl UserLoginInfo {
    pub fn new(
        login_provider: impl Into<String>,
        provider_key: impl Into<String>,
        provider_display_name: Option<String>,
    ) -> Self {
        Self {
            login_provider: login_provider.into(),
            provider_key: provider_key.into(),
            provider_display_name,
        }
    }
}
