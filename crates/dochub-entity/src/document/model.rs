//! Document entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Logical storage module holding document content.
pub const DOCUMENT_MODULE: &str = "documents";

/// A named, described, access-tracked file record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Document {
    /// Unique document identifier.
    pub id: i64,
    /// Display name (usually the uploaded file name).
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Containing folder (None for root-level documents).
    pub folder_id: Option<i64>,
    /// User who created the document.
    pub creator_id: Option<i64>,
    /// User who last saved the document.
    pub modifier_id: Option<i64>,
    /// Creation time. Never changes after insert.
    pub date_creation: DateTime<Utc>,
    /// Time of the last save.
    pub date_modification: DateTime<Utc>,
}

/// Storage slot for the document with the given id, relative to the user
/// directory. Derived from the numeric id so that renaming never moves content.
pub fn storage_slot(document_id: i64) -> String {
    format!("{DOCUMENT_MODULE}/document_{document_id}")
}

/// Data required to insert a document row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDocument {
    /// Display name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Containing folder.
    pub folder_id: Option<i64>,
    /// Creating user; also recorded as the first modifier.
    pub creator_id: Option<i64>,
    /// Creation time; also recorded as the first modification time.
    pub created_at: DateTime<Utc>,
}

/// Data written when a document is saved again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateDocument {
    /// Document to update.
    pub id: i64,
    /// New display name.
    pub name: String,
    /// New description.
    pub description: String,
    /// New containing folder.
    pub folder_id: Option<i64>,
    /// Acting user.
    pub modifier_id: Option<i64>,
    /// Save time.
    pub modified_at: DateTime<Utc>,
}
