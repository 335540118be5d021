//! Document domain entities.

pub mod model;

pub use model::{CreateDocument, DOCUMENT_MODULE, Document, UpdateDocument, storage_slot};
