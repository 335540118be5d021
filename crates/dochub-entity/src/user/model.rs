//! User entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Display value for an absent user reference.
pub const NO_USER: &str = "---";

/// A registered user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: i64,
    /// Unique login name.
    pub username: String,
    /// First name (may be empty).
    pub first_name: String,
    /// Last name (may be empty).
    pub last_name: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Whether the user bypasses every folder permission.
    pub is_superuser: bool,
    /// Whether the user may log in.
    pub is_active: bool,
}

impl User {
    /// `"first last"` when a name is set, the username otherwise.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

/// Display name of an optional user reference.
pub fn display_or_none(user: Option<&User>) -> String {
    user.map(User::display_name)
        .unwrap_or_else(|| NO_USER.to_string())
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Desired username.
    pub username: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Superuser flag.
    pub is_superuser: bool,
}
