//! Folder management services.

pub mod service;

pub use service::{FolderForm, FolderListEntry, FolderService, NO_PARENT};
