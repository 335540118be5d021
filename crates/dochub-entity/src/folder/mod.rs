//! Folder domain entities.

pub mod model;
pub mod path;

pub use model::{Folder, FolderInput, FolderWithGroups};
pub use path::FolderPath;
