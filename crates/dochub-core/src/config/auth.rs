//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub jwt_access_ttl_minutes: u64,
    /// Username of the superuser created when the user table is empty.
    #[serde(default = "default_bootstrap_username")]
    pub bootstrap_admin_username: String,
    /// Password of the bootstrap superuser. Bootstrapping is skipped when empty.
    #[serde(default)]
    pub bootstrap_admin_password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_access_ttl_minutes: default_access_ttl(),
            bootstrap_admin_username: default_bootstrap_username(),
            bootstrap_admin_password: String::new(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_access_ttl() -> u64 {
    480
}

fn default_bootstrap_username() -> String {
    "admin".to_string()
}
