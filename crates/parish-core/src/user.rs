//! The signed-in user.

use serde::{Deserialize, Serialize};

/// An account from the external identity provider.
///
/// Passed explicitly to anything that depends on who is acting; there is
/// no ambient current user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_super_admin: bool,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_super_admin: false,
        }
    }

    /// Grant parish-wide administration rights.
    pub fn super_admin(mut self) -> Self {
        self.is_super_admin = true;
        self
    }
}
