//! Registered identity model.

use serde::{Deserialize, Serialize};

use gatekey_core::UserId;

/// A registered user as seen by the auth core.
///
/// Roles are bound by name; the directory owns role existence, identities
/// only carry the binding. The id is immutable once created by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub roles: Vec<String>,
}

impl Identity {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}
