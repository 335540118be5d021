//! Folder path titles.

use serde::{Deserialize, Serialize};

use super::model::Folder;

/// Separator placed before every folder name in a path title.
pub const PATH_SEPARATOR: char = '>';

/// The chain of folders from the root down to a folder.
///
/// The root level itself (no folder) is the empty path, whose title is
/// a lone separator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderPath {
    /// Folders ordered from the top-level ancestor to the folder itself.
    pub segments: Vec<Folder>,
}

impl FolderPath {
    /// The root level.
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a path from an ancestor chain ordered leaf first.
    pub fn from_leaf_first(mut chain: Vec<Folder>) -> Self {
        chain.reverse();
        Self { segments: chain }
    }

    /// The folder this path ends at (None for the root level).
    pub fn leaf(&self) -> Option<&Folder> {
        self.segments.last()
    }

    /// Id of the level above the leaf: the parent folder, `Some(0)` for
    /// a top-level folder, and `None` at the root level.
    pub fn parent_entry(&self) -> Option<i64> {
        self.leaf().map(|f| f.parent_id.unwrap_or(0))
    }

    /// `">a>b>c"`, or `">"` for the root level.
    pub fn title(&self) -> String {
        if self.segments.is_empty() {
            return PATH_SEPARATOR.to_string();
        }
        self.segments
            .iter()
            .map(|f| format!("{PATH_SEPARATOR}{}", f.name))
            .collect()
    }

    /// Whether `folder_id` appears anywhere on the path.
    pub fn contains(&self, folder_id: i64) -> bool {
        self.segments.iter().any(|f| f.id == folder_id)
    }
}
