//! Document browsing, upload, editing, deletion, and download.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use tracing::{info, warn};

use dochub_core::error::AppError;
use dochub_core::result::AppResult;
use dochub_core::traits::storage::ByteStream;
use dochub_database::repositories::{DocumentRepository, FolderRepository, UserRepository};
use dochub_entity::document::{CreateDocument, Document, UpdateDocument};
use dochub_entity::folder::FolderPath;
use dochub_entity::user::{User, display_or_none};
use dochub_storage::DocumentStore;

use crate::access::{AccessService, FolderRight, has_right};
use crate::context::RequestContext;

/// Caption of the navigation entry leading one level up.
pub const PARENT_ENTRY: &str = "..";

/// An uploaded file.
#[derive(Debug, Clone)]
pub struct Upload {
    /// Client-side file name.
    pub file_name: String,
    /// File content.
    pub content: Bytes,
}

/// Values for a new document.
#[derive(Debug, Clone)]
pub struct NewDocument {
    /// Target folder (None for the root level).
    pub folder_id: Option<i64>,
    /// Description.
    pub description: String,
    /// Uploaded content; its file name becomes the document name.
    pub upload: Option<Upload>,
}

/// Changes applied when a document is saved again. Absent fields keep
/// their current value.
#[derive(Debug, Clone, Default)]
pub struct DocumentChanges {
    /// New display name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New folder; `Some(None)` moves the document to the root level.
    pub folder_id: Option<Option<i64>>,
    /// Replacement content.
    pub upload: Option<Upload>,
}

/// A document with its modifier resolved for display.
#[derive(Debug, Clone, serde::Serialize)]
pub struct DocumentRow {
    /// The document.
    pub document: Document,
    /// Display name of the last modifier, `"---"` when unknown.
    pub modifier: String,
}

/// The document screen of one folder.
#[derive(Debug, Clone, serde::Serialize)]
pub struct FolderView {
    /// Root-to-folder chain.
    pub path: FolderPath,
    /// Description of the current folder (empty at root level).
    pub description: String,
    /// Navigation entries `(id, caption)`: [`PARENT_ENTRY`] first unless at
    /// the root level (id 0 leads to the root), then the viewable
    /// sub-folders.
    pub entries: Vec<(i64, String)>,
    /// Documents of the current folder.
    pub documents: Vec<DocumentRow>,
    /// Whether the user may add documents here.
    pub can_modify: bool,
}

/// A single document with every reference resolved for display.
#[derive(Debug, Clone, serde::Serialize)]
pub struct DocumentDetails {
    /// The document.
    pub document: Document,
    /// Path title of its folder.
    pub folder_title: String,
    /// Display name of the creator.
    pub creator: String,
    /// Display name of the last modifier.
    pub modifier: String,
    /// Whether the user may change or delete it.
    pub can_modify: bool,
}

/// Manages documents and their stored content.
#[derive(Debug, Clone)]
pub struct DocumentService {
    /// Document repository.
    document_repo: Arc<DocumentRepository>,
    /// Folder repository.
    folder_repo: Arc<FolderRepository>,
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Document content store.
    store: DocumentStore,
    /// Access rules.
    access: AccessService,
    /// Maximum accepted upload size.
    max_upload_size_bytes: u64,
}

impl DocumentService {
    /// Creates a new document service.
    pub fn new(
        document_repo: Arc<DocumentRepository>,
        folder_repo: Arc<FolderRepository>,
        user_repo: Arc<UserRepository>,
        store: DocumentStore,
        max_upload_size_bytes: u64,
    ) -> Self {
        Self {
            access: AccessService::new(Arc::clone(&folder_repo)),
            document_repo,
            folder_repo,
            user_repo,
            store,
            max_upload_size_bytes,
        }
    }

    /// The document screen of `current_folder` (None for the root level).
    pub async fn browse(
        &self,
        ctx: &RequestContext,
        current_folder: Option<i64>,
    ) -> AppResult<FolderView> {
        let folder = self.access.require(ctx, current_folder, FolderRight::View).await?;

        let path = match current_folder {
            Some(id) => FolderPath::from_leaf_first(self.folder_repo.find_ancestors(id).await?),
            None => FolderPath::root(),
        };

        let mut entries = Vec::new();
        if let Some(parent) = path.parent_entry() {
            entries.push((parent, PARENT_ENTRY.to_string()));
        }
        for child in self.folder_repo.find_children(current_folder).await? {
            if has_right(ctx, Some(&child), FolderRight::View) {
                entries.push((child.folder.id, child.folder.name));
            }
        }

        let mut users = UserCache::default();
        let mut documents = Vec::new();
        for document in self.document_repo.find_in_folder(current_folder).await? {
            let modifier = users.display(&self.user_repo, document.modifier_id).await?;
            documents.push(DocumentRow { document, modifier });
        }

        Ok(FolderView {
            description: folder
                .as_ref()
                .map(|f| f.folder.description.clone())
                .unwrap_or_default(),
            can_modify: has_right(ctx, folder.as_ref(), FolderRight::Modify),
            path,
            entries,
            documents,
        })
    }

    /// Path title of the folder documents would be added to.
    pub async fn folder_title(
        &self,
        ctx: &RequestContext,
        folder_id: Option<i64>,
    ) -> AppResult<String> {
        self.access.require(ctx, folder_id, FolderRight::Modify).await?;
        Ok(self.path(folder_id).await?.title())
    }

    /// A single document with creator and modifier names resolved.
    pub async fn get(&self, ctx: &RequestContext, document_id: i64) -> AppResult<DocumentDetails> {
        let document = self.find(document_id).await?;
        let folder = self
            .access
            .require(ctx, document.folder_id, FolderRight::View)
            .await?;

        let mut users = UserCache::default();
        Ok(DocumentDetails {
            folder_title: self.path(document.folder_id).await?.title(),
            creator: users.display(&self.user_repo, document.creator_id).await?,
            modifier: users.display(&self.user_repo, document.modifier_id).await?,
            can_modify: has_right(ctx, folder.as_ref(), FolderRight::Modify),
            document,
        })
    }

    /// Creates a document from an upload and stores its content.
    pub async fn create(&self, ctx: &RequestContext, new: NewDocument) -> AppResult<Document> {
        self.access
            .require(ctx, new.folder_id, FolderRight::Modify)
            .await?;
        let upload = new
            .upload
            .ok_or_else(|| AppError::validation("A file must be uploaded"))?;
        let name = self.check_upload(&upload)?;

        let document = self
            .document_repo
            .create(&CreateDocument {
                name,
                description: new.description,
                folder_id: new.folder_id,
                creator_id: Some(ctx.user_id),
                created_at: ctx.request_time,
            })
            .await?;

        if let Err(e) = self.store.save(document.id, upload.content).await {
            warn!(document_id = document.id, error = %e, "Storing content failed, removing row");
            self.document_repo.delete(document.id).await?;
            return Err(e);
        }

        info!(
            user_id = ctx.user_id,
            document_id = document.id,
            name = %document.name,
            folder_id = ?document.folder_id,
            "Document created"
        );
        Ok(document)
    }

    /// Saves a document again: the modifier becomes the acting user and the
    /// modification date advances. Creation data never changes.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        document_id: i64,
        changes: DocumentChanges,
    ) -> AppResult<Document> {
        let current = self.find(document_id).await?;
        self.access
            .require(ctx, current.folder_id, FolderRight::Modify)
            .await?;

        let folder_id = match changes.folder_id {
            Some(target) if target != current.folder_id => {
                self.access.require(ctx, target, FolderRight::Modify).await?;
                target
            }
            _ => current.folder_id,
        };

        if let Some(upload) = &changes.upload {
            self.check_upload(upload)?;
        }
        let name = match changes.name.map(|n| n.trim().to_string()) {
            Some(name) if !name.is_empty() => name,
            Some(_) => return Err(AppError::validation("Document name cannot be empty")),
            None => current.name.clone(),
        };

        // Never let the recorded modification precede the creation.
        let modified_at = Utc::now().max(current.date_creation);
        let document = self
            .document_repo
            .update(&UpdateDocument {
                id: document_id,
                name,
                description: changes
                    .description
                    .unwrap_or_else(|| current.description.clone()),
                folder_id,
                modifier_id: Some(ctx.user_id),
                modified_at,
            })
            .await?;

        if let Some(upload) = changes.upload {
            if let Err(e) = self.store.save(document_id, upload.content).await {
                warn!(document_id, error = %e, "Storing content failed, restoring row");
                self.document_repo
                    .update(&UpdateDocument {
                        id: document_id,
                        name: current.name,
                        description: current.description,
                        folder_id: current.folder_id,
                        modifier_id: current.modifier_id,
                        modified_at: current.date_modification,
                    })
                    .await?;
                return Err(e);
            }
        }

        info!(user_id = ctx.user_id, document_id, "Document saved");
        Ok(document)
    }

    /// Deletes documents and their stored content. Returns how many were
    /// removed.
    pub async fn delete(&self, ctx: &RequestContext, document_ids: &[i64]) -> AppResult<usize> {
        if document_ids.is_empty() {
            return Err(AppError::validation("No document selected"));
        }

        let mut documents = Vec::with_capacity(document_ids.len());
        for &id in document_ids {
            let document = self.find(id).await?;
            self.access
                .require(ctx, document.folder_id, FolderRight::Modify)
                .await?;
            documents.push(document);
        }

        for document in &documents {
            self.document_repo.delete(document.id).await?;
            self.store.remove(document.id).await?;
            info!(user_id = ctx.user_id, document_id = document.id, "Document deleted");
        }
        Ok(documents.len())
    }

    /// The document and a stream over its stored content.
    pub async fn download(
        &self,
        ctx: &RequestContext,
        document_id: i64,
    ) -> AppResult<(Document, ByteStream)> {
        let document = self.find(document_id).await?;
        self.access
            .require(ctx, document.folder_id, FolderRight::View)
            .await?;
        let content = self.store.open(document_id).await?;
        Ok((document, content))
    }

    async fn find(&self, document_id: i64) -> AppResult<Document> {
        self.document_repo
            .find_by_id(document_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Document {document_id} not found")))
    }

    async fn path(&self, folder_id: Option<i64>) -> AppResult<FolderPath> {
        Ok(match folder_id {
            Some(id) => FolderPath::from_leaf_first(self.folder_repo.find_ancestors(id).await?),
            None => FolderPath::root(),
        })
    }

    fn check_upload(&self, upload: &Upload) -> AppResult<String> {
        let name = upload
            .file_name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_string();
        if name.is_empty() {
            return Err(AppError::validation("The uploaded file has no name"));
        }
        if upload.content.len() as u64 > self.max_upload_size_bytes {
            return Err(AppError::validation(format!(
                "File exceeds maximum upload size of {} bytes",
                self.max_upload_size_bytes
            )));
        }
        Ok(name)
    }
}

/// Memoizes user display names within one request.
#[derive(Default)]
struct UserCache {
    users: HashMap<i64, Option<User>>,
}

impl UserCache {
    async fn display(&mut self, repo: &UserRepository, user_id: Option<i64>) -> AppResult<String> {
        let Some(id) = user_id else {
            return Ok(display_or_none(None));
        };
        if !self.users.contains_key(&id) {
            let user = repo.find_by_id(id).await?;
            self.users.insert(id, user);
        }
        Ok(display_or_none(self.users.get(&id).and_then(Option::as_ref)))
    }
}
