use serde::{Deserialize, Serialize};

/// Authentication token issued by an external provider, keyed by
/// `(login_provider, name)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AuthToken {
    pub login_provider: String,
    pub name: String,
    pub token: String,
}

impl AuthToken {
    pub fn new(
        login_provider: impl Into<String>,
        name: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            login_provider: login_provider.into(),
            name: name.into(),
            token: token.into(),
        }
    }

    pub fn is_keyed(&self, login_provider: &str, name: &str) -> bool {
        self.login_provider == login_provider && self.name == name
    }
}
