use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::id::RoleId;

/// A role in the identity system.
///
/// Users reference roles by normalized name only; nothing else about a role
/// is copied into user documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Role {
    #[serde(rename = "_id")]
    id: RoleId,
    pub name: Option<String>,
    pub normalized_name: Option<String>,
    /// Random value meant to change whenever the role is persisted. Stored
    /// verbatim; the store does not compare it.
    #[serde(default = "new_concurrency_stamp")]
    pub concurrency_stamp: String,
}

fn new_concurrency_stamp() -> String {
    Uuid::new_v4().to_string()
}

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: RoleId::generate(),
            name: Some(name.into()),
            normalized_name: None,
            concurrency_stamp: new_concurrency_stamp(),
        }
    }

    pub fn id(&self) -> RoleId {
        self.id
    }

    /// Assign a fresh concurrency stamp.
    pub fn refresh_concurrency_stamp(&mut self) {
        self.concurrency_stamp = new_concurrency_stamp();
    }
}
