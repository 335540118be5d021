//! Request context carrying the authenticated user and their groups.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dochub_entity::user::User;

/// Context for the current authenticated request.
///
/// Built by the API layer once the bearer token is validated and passed
/// into service methods so that every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: i64,
    /// The username.
    pub username: String,
    /// Whether the user bypasses folder permissions.
    pub is_superuser: bool,
    /// Groups the user belongs to, ascending.
    pub group_ids: Vec<i64>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context for `user`.
    pub fn new(user: &User, group_ids: Vec<i64>) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            is_superuser: user.is_superuser,
            group_ids,
            request_time: Utc::now(),
        }
    }
}
