//! Group entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An access-control role. Folders grant viewing and modifying rights to
/// groups, and users gain those rights through membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Group {
    /// Unique group identifier.
    pub id: i64,
    /// Unique group name.
    pub name: String,
}
