//! Filter documents for every lookup the stores issue.
//!
//! Field names follow the persisted (PascalCase) layout of the entities.

use mongodb::bson::{Document, doc, oid::ObjectId};

pub const ID: &str = "_id";
pub const NORMALIZED_NAME: &str = "NormalizedName";
pub const NORMALIZED_EMAIL: &str = "NormalizedEmail";
pub const LOGINS: &str = "Logins";
pub const LOGIN_PROVIDER: &str = "LoginProvider";
pub const PROVIDER_KEY: &str = "ProviderKey";
pub const CLAIMS: &str = "Claims";
pub const ROLES: &str = "Roles";
pub const EMAIL_CONFIRMED: &str = "EmailConfirmed";
pub const CONCURRENCY_STAMP: &str = "ConcurrencyStamp";

pub fn by_id(id: ObjectId) -> Document {
    doc! { ID: id }
}

pub fn by_normalized_name(normalized_name: &str) -> Document {
    doc! { NORMALIZED_NAME: normalized_name }
}

pub fn by_normalized_email(normalized_email: &str) -> Document {
    doc! { NORMALIZED_EMAIL: normalized_email }
}

/// Users with a login entry matching both provider and key in the same
/// array element.
pub fn by_login(login_provider: &str, provider_key: &str) -> Document {
    doc! {
        LOGINS: {
            "$elemMatch": {
                LOGIN_PROVIDER: login_provider,
                PROVIDER_KEY: provider_key,
            }
        }
    }
}

/// Users holding a claim with this exact type and value.
pub fn by_claim(claim_type: &str, value: &str) -> Document {
    doc! {
        CLAIMS: {
            "$elemMatch": {
                "Type": claim_type,
                "Value": value,
            }
        }
    }
}

/// Users whose embedded role list contains `role_name`.
pub fn in_role(role_name: &str) -> Document {
    doc! { ROLES: role_name }
}

pub fn all() -> Document {
    doc! {}
}

/// Matches user documents only. Every persisted user carries
/// `EmailConfirmed`; roles never do.
pub fn user_documents() -> Document {
    doc! { EMAIL_CONFIRMED: { "$exists": true } }
}

/// Matches role documents only.
pub fn role_documents() -> Document {
    doc! { EMAIL_CONFIRMED: { "$exists": false } }
}

/// Adds the conditions of `scope` to `filter`.
pub fn scoped(mut filter: Document, scope: Document) -> Document {
    filter.extend(scope);
    filter
}
