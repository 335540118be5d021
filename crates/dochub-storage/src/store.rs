//! Document content store on top of a storage provider.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, warn};

use dochub_core::result::AppResult;
use dochub_core::traits::storage::{ByteStream, StorageProvider};

use crate::slots::document_slot;

/// Reads and writes document content by document id.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    provider: Arc<dyn StorageProvider>,
}

impl DocumentStore {
    /// Wrap a storage provider rooted at the user directory.
    pub fn new(provider: Arc<dyn StorageProvider>) -> Self {
        Self { provider }
    }

    /// Whether the underlying provider is reachable.
    pub async fn health_check(&self) -> AppResult<bool> {
        self.provider.health_check().await
    }

    /// Store (or replace) the content of a document.
    pub async fn save(&self, document_id: i64, content: Bytes) -> AppResult<()> {
        let slot = document_slot(document_id);
        debug!(document_id, bytes = content.len(), "Storing document content");
        self.provider.write(&slot, content).await
    }

    /// Open the content of a document as a byte stream.
    pub async fn open(&self, document_id: i64) -> AppResult<ByteStream> {
        self.provider.read(&document_slot(document_id)).await
    }

    /// Remove the content of a document. Missing content is not an error.
    pub async fn remove(&self, document_id: i64) -> AppResult<()> {
        self.provider.delete(&document_slot(document_id)).await
    }

    /// Remove the content of several documents, logging failures instead of
    /// aborting once the rows are already gone.
    pub async fn remove_all(&self, document_ids: &[i64]) {
        for id in document_ids {
            if let Err(e) = self.remove(*id).await {
                warn!(document_id = id, error = %e, "Failed to remove document content");
            }
        }
    }
}
