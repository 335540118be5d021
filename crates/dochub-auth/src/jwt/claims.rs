//! Access-token payload.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Payload of a DocHub access token.
///
/// Only the user id is trusted: groups and the superuser flag are read from
/// the database on every request, so a changed membership applies at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// Claims for `user_id`, valid for `ttl` from `issued_at`.
    pub fn new(user_id: i64, username: &str, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            sub: user_id,
            username: username.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        }
    }

    pub fn user_id(&self) -> i64 {
        self.sub
    }
}
