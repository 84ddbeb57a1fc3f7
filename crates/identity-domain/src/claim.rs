use serde::{Deserialize, Serialize};

/// A type/value pair asserted about a user.
///
/// The `(claim_type, value)` pair is the identity of a claim; a user never
/// holds two claims with the same pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserClaim {
    #[serde(rename = "Type")]
    pub claim_type: String,
    pub value: String,
}

impl UserClaim {
    pub fn new(claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            claim_type: claim_type.into(),
            value: value.into(),
        }
    }

    /// Whether `other` has the same `(type, value)` key.
    pub fn matches(&self, other: &UserClaim) -> bool {
        self.claim_type == other.claim_type && self.value == other.value
    }
}
