//! User account model.
//!
//! Accounts are owned by the authentication provider; core only needs the
//! identity to decide note ownership.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a user account.
pub type UserId = Uuid;

/// Authenticated identity acting on notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
}

impl User {
    /// Creates a user with a generated stable ID.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
        }
    }
}
