//! Repository implementations for all DocHub entities.

pub mod document;
pub mod folder;
pub mod group;
pub mod user;

pub use document::DocumentRepository;
pub use folder::FolderRepository;
pub use group::GroupRepository;
pub use user::UserRepository;
