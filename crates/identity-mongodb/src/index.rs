//! Index definitions created when `manage_indexes` is enabled.

use mongodb::IndexModel;
use mongodb::bson::{Document, doc};
use mongodb::options::IndexOptions;

use crate::filter::{
    CONCURRENCY_STAMP, EMAIL_CONFIRMED, LOGIN_PROVIDER, LOGINS, NORMALIZED_EMAIL, NORMALIZED_NAME,
    PROVIDER_KEY, ROLES,
};

/// Only index documents of one type whose normalized name is an actual
/// string, so users without a name do not collide on `null` and a user
/// never collides with a role in a shared collection.
///
/// Partial filters accept `$exists: true` only, so each type is keyed on a
/// field the other type lacks.
fn named_documents(type_field: &str) -> Document {
    doc! {
        NORMALIZED_NAME: { "$type": "string" },
        type_field: { "$exists": true },
    }
}

fn unique_normalized_name(index_name: &str, type_field: &str, direction: i32) -> IndexModel {
    IndexModel::builder()
        .keys(doc! { NORMALIZED_NAME: direction })
        .options(
            IndexOptions::builder()
                .name(index_name.to_owned())
                .unique(true)
                .partial_filter_expression(named_documents(type_field))
                .build(),
        )
        .build()
}

fn lookup(index_name: &str, keys: Document) -> IndexModel {
    IndexModel::builder()
        .keys(keys)
        .options(IndexOptions::builder().name(index_name.to_owned()).build())
        .build()
}

pub fn user_indexes() -> Vec<IndexModel> {
    vec![
        unique_normalized_name("ux_user_normalized_name", EMAIL_CONFIRMED, 1),
        lookup("ix_user_normalized_email", doc! { NORMALIZED_EMAIL: 1 }),
        lookup(
            "ix_user_logins",
            doc! {
                format!("{LOGINS}.{LOGIN_PROVIDER}"): 1,
                format!("{LOGINS}.{PROVIDER_KEY}"): 1,
            },
        ),
        lookup("ix_user_roles", doc! { ROLES: 1 }),
    ]
}

/// The role index is descending so its key pattern differs from the user
/// index when both live in one collection.
pub fn role_indexes() -> Vec<IndexModel> {
    vec![unique_normalized_name(
        "ux_role_normalized_name",
        CONCURRENCY_STAMP,
        -1,
    )]
}
