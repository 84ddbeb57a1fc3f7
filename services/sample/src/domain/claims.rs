//! Claims extracted from a provider's user-info JSON payload.

use serde_json::Value;

use identity_domain::UserClaim;

use crate::domain::provider::{ClaimMapping, ClaimSource, ExternalProvider};

/// Collects claims from `payload`, skipping keys that are absent or empty.
pub struct JsonKeyClaims<'a> {
    payload: &'a Value,
    claims: Vec<UserClaim>,
}

impl<'a> JsonKeyClaims<'a> {
    pub fn new(payload: &'a Value) -> Self {
        Self {
            payload,
            claims: Vec::new(),
        }
    }

    /// Add `claim_type` from `payload[key]`.
    pub fn try_add_by_json_key(&mut self, claim_type: &str, key: &str) -> bool {
        let value = self.payload.get(key).and_then(scalar_text);
        self.push(claim_type, value)
    }

    /// Add `claim_type` from `payload[key][sub_key]`. The parent may be an
    /// object or a string holding an encoded object.
    pub fn try_add_by_json_sub_key(&mut self, claim_type: &str, key: &str, sub_key: &str) -> bool {
        let value = match self.payload.get(key) {
            Some(Value::Object(parent)) => parent.get(sub_key).and_then(scalar_text),
            Some(Value::String(encoded)) => serde_json::from_str::<Value>(encoded)
                .ok()
                .and_then(|parent| parent.get(sub_key).and_then(scalar_text)),
            _ => None,
        };
        self.push(claim_type, value)
    }

    pub fn apply(&mut self, mapping: &ClaimMapping) -> bool {
        match mapping.source {
            ClaimSource::Key(key) => self.try_add_by_json_key(mapping.claim_type, key),
            ClaimSource::SubKey(key, sub) => {
                self.try_add_by_json_sub_key(mapping.claim_type, key, sub)
            }
        }
    }

    pub fn into_claims(self) -> Vec<UserClaim> {
        self.claims
    }

    fn push(&mut self, claim_type: &str, value: Option<String>) -> bool {
        let Some(value) = value.filter(|v| !v.is_empty()) else {
            return false;
        };
        self.claims.push(UserClaim::new(claim_type, value));
        true
    }
}

/// Text of a string, number or boolean; `None` for anything else.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Every claim `provider` maps from its user-info payload.
pub fn provider_claims(provider: ExternalProvider, payload: &Value) -> Vec<UserClaim> {
    let mut claims = JsonKeyClaims::new(payload);
    for mapping in provider.claim_mappings() {
        claims.apply(mapping);
    }
    claims.into_claims()
}

/// Whether `payload` carries `provider`'s own flag saying the email it
/// returned is verified. Providers without such a flag never vouch for an
/// address.
pub fn email_verified(provider: ExternalProvider, payload: &Value) -> bool {
    let Some(key) = provider.email_verified_key() else {
        return false;
    };
    match payload.get(key) {
        Some(Value::Bool(verified)) => *verified,
        Some(Value::String(verified)) => verified.eq_ignore_ascii_case("true"),
        _ => false,
    }
}
