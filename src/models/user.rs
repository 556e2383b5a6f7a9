//! User record and the client-supplied field pair.

use serde::{Deserialize, Serialize};

/// A stored user record.
///
/// `id` is assigned by the store at creation time and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Name and email as submitted by a client.
///
/// Absent fields deserialize to the empty string; no other validation
/// is performed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UserFields {
    pub name: String,
    pub email: String,
}

impl UserFields {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}
