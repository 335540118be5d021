//! Folder entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A folder in the document hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: i64,
    /// Folder name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Parent folder ID (null for root folders).
    pub parent_id: Option<i64>,
}

impl Folder {
    /// Check if this is a root folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// A folder together with its access-control group sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderWithGroups {
    /// The folder row.
    pub folder: Folder,
    /// Groups allowed to see the folder, ascending by id.
    pub viewer: Vec<i64>,
    /// Groups allowed to change documents in the folder, ascending by id.
    pub modifier: Vec<i64>,
}

impl FolderWithGroups {
    /// Whether any of `groups` is among the viewers.
    pub fn is_viewer(&self, groups: &[i64]) -> bool {
        self.viewer.iter().any(|g| groups.contains(g))
    }

    /// Whether any of `groups` is among the modifiers.
    pub fn is_modifier(&self, groups: &[i64]) -> bool {
        self.modifier.iter().any(|g| groups.contains(g))
    }
}

/// Values submitted when adding or modifying a folder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FolderInput {
    /// Folder name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Parent folder (None for root).
    pub parent_id: Option<i64>,
    /// Viewer group ids.
    pub viewer: Vec<i64>,
    /// Modifier group ids.
    pub modifier: Vec<i64>,
}
