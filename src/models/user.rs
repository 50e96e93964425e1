//! User data model

use serde::{Deserialize, Serialize};

/// Registered user as stored in the user store.
///
/// `password_hash` is a PHC string; the plaintext password never leaves
/// the auth layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub password_hash: String,
}

impl User {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }
}
