//! Document services.

pub mod service;

pub use service::{DocumentChanges, DocumentDetails, DocumentRow, DocumentService, FolderView, NewDocument, Upload};
