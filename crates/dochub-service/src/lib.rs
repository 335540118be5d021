//! # dochub-service
//!
//! Business logic service layer for DocHub. Each service orchestrates
//! repositories, document storage, and authentication to implement the
//! folder and document use cases.
//!
//! Services follow constructor injection. All dependencies are provided
//! at construction time via `Arc` references.

pub mod access;
pub mod context;
pub mod document;
pub mod folder;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support;

pub use access::AccessService;
pub use context::RequestContext;
pub use document::DocumentService;
pub use folder::FolderService;
pub use user::{AuthService, UserService};
