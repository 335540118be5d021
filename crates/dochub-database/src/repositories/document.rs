//! Document repository implementation.

use sqlx::SqlitePool;
use tracing::debug;

use dochub_core::error::{AppError, ErrorKind};
use dochub_core::result::AppResult;
use dochub_entity::document::{CreateDocument, Document, UpdateDocument};

const DOCUMENT_COLUMNS: &str = "id, name, description, folder_id, creator_id, modifier_id, \
     date_creation, date_modification";

/// Repository for document records.
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    pool: SqlitePool,
}

impl DocumentRepository {
    /// Create a new document repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a document by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Document>> {
        sqlx::query_as::<_, Document>(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find document", e))
    }

    /// Documents directly inside a folder (or at root level for None),
    /// ordered by name.
    pub async fn find_in_folder(&self, folder_id: Option<i64>) -> AppResult<Vec<Document>> {
        sqlx::query_as::<_, Document>(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents WHERE folder_id IS ? \
             ORDER BY name ASC, id ASC"
        ))
        .bind(folder_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list documents", e))
    }

    /// IDs of the documents inside any of the given folders.
    pub async fn find_ids_in_folders(&self, folder_ids: &[i64]) -> AppResult<Vec<i64>> {
        if folder_ids.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = vec!["?"; folder_ids.len()].join(", ");
        let sql = format!(
            "SELECT id FROM documents WHERE folder_id IN ({placeholders}) ORDER BY id ASC"
        );
        let mut query = sqlx::query_scalar::<_, i64>(&sql);
        for id in folder_ids {
            query = query.bind(*id);
        }
        query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list documents", e))
    }

    /// Insert a document. The creator is also recorded as the first modifier
    /// and both dates are set to `created_at`.
    pub async fn create(&self, data: &CreateDocument) -> AppResult<Document> {
        let document = sqlx::query_as::<_, Document>(&format!(
            "INSERT INTO documents \
             (name, description, folder_id, creator_id, modifier_id, date_creation, date_modification) \
             VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING {DOCUMENT_COLUMNS}"
        ))
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.folder_id)
        .bind(data.creator_id)
        .bind(data.creator_id)
        .bind(data.created_at)
        .bind(data.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create document", e))?;

        debug!(document_id = document.id, name = %document.name, "Inserted document");
        Ok(document)
    }

    /// Save a document again. `date_creation` and `creator_id` are untouched.
    pub async fn update(&self, data: &UpdateDocument) -> AppResult<Document> {
        let document = sqlx::query_as::<_, Document>(&format!(
            "UPDATE documents SET name = ?, description = ?, folder_id = ?, modifier_id = ?, \
             date_modification = ? WHERE id = ? RETURNING {DOCUMENT_COLUMNS}"
        ))
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.folder_id)
        .bind(data.modifier_id)
        .bind(data.modified_at)
        .bind(data.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update document", e))?
        .ok_or_else(|| AppError::not_found(format!("Document {} not found", data.id)))?;

        debug!(document_id = document.id, "Updated document");
        Ok(document)
    }

    /// Delete a document row.
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete document", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// Count all documents.
    pub async fn count(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM documents")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count documents", e)
            })
    }
}
