//! # dochub-storage
//!
//! Document content storage for DocHub. Content lives on the local
//! filesystem under the per-user data directory, one slot per document.

pub mod providers;
pub mod slots;
pub mod store;

pub use providers::LocalStorageProvider;
pub use store::DocumentStore;
