//! Mapping of logical storage slots to the per-user data directory.
//!
//! Every module stores its files under `<data_root>/usr/<module>/<name>`.

use std::path::{Path, PathBuf};

use dochub_entity::document::storage_slot;

/// Name of the per-user directory below the data root.
pub const USER_DIR: &str = "usr";

/// The per-user data directory below `data_root`.
pub fn user_dir(data_root: &Path) -> PathBuf {
    data_root.join(USER_DIR)
}

/// Logical slot of a document's content, relative to the user directory.
pub fn document_slot(document_id: i64) -> String {
    storage_slot(document_id)
}
