//! Folder management: listing, forms, saving, and cascading deletion.

use std::sync::Arc;

use tracing::info;

use dochub_core::error::AppError;
use dochub_core::result::AppResult;
use dochub_database::repositories::{DocumentRepository, FolderRepository, GroupRepository};
use dochub_entity::folder::{FolderInput, FolderPath, FolderWithGroups};
use dochub_entity::group::Group;
use dochub_storage::DocumentStore;

use crate::access::AccessService;
use crate::context::RequestContext;

/// Label shown where a folder has no parent.
pub const NO_PARENT: &str = "---";

/// One row of the folder list.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FolderListEntry {
    /// The folder and its groups.
    pub folder: FolderWithGroups,
    /// Path title of the folder itself.
    pub title: String,
    /// Path title of the parent, or [`NO_PARENT`].
    pub parent_title: String,
}

/// Everything the add/modify folder form needs.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FolderForm {
    /// The edited folder (None when adding).
    pub current: Option<FolderWithGroups>,
    /// Folders that may become the parent, as `(id, path title)`, ordered
    /// by title. The edited folder and its descendants are excluded.
    pub parents: Vec<(i64, String)>,
    /// Every group, for the viewer and modifier checklists.
    pub groups: Vec<Group>,
}

/// Manages folder CRUD operations.
#[derive(Debug, Clone)]
pub struct FolderService {
    /// Folder repository.
    folder_repo: Arc<FolderRepository>,
    /// Document repository.
    document_repo: Arc<DocumentRepository>,
    /// Group repository.
    group_repo: Arc<GroupRepository>,
    /// Document content store.
    store: DocumentStore,
    /// Access rules.
    access: AccessService,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(
        folder_repo: Arc<FolderRepository>,
        document_repo: Arc<DocumentRepository>,
        group_repo: Arc<GroupRepository>,
        store: DocumentStore,
    ) -> Self {
        Self {
            access: AccessService::new(Arc::clone(&folder_repo)),
            folder_repo,
            document_repo,
            group_repo,
            store,
        }
    }

    /// Fails unless `ctx` may manage folders.
    pub fn check_admin(&self, ctx: &RequestContext) -> AppResult<()> {
        self.access.require_folder_admin(ctx)
    }

    /// The root-to-folder chain of `folder_id` (None for the root level).
    pub async fn path(&self, folder_id: Option<i64>) -> AppResult<FolderPath> {
        match folder_id {
            None => Ok(FolderPath::root()),
            Some(id) => {
                let chain = self.folder_repo.find_ancestors(id).await?;
                if chain.is_empty() {
                    return Err(AppError::not_found(format!("Folder {id} not found")));
                }
                Ok(FolderPath::from_leaf_first(chain))
            }
        }
    }

    /// `">a>b"` path title of `folder_id`.
    pub async fn path_title(&self, folder_id: Option<i64>) -> AppResult<String> {
        Ok(self.path(folder_id).await?.title())
    }

    /// Every folder with its path titles, ordered by path title.
    pub async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<FolderListEntry>> {
        self.access.require_folder_admin(ctx)?;

        let mut entries = Vec::new();
        for folder in self.folder_repo.find_all().await? {
            let title = self.path_title(Some(folder.id)).await?;
            let parent_title = match folder.parent_id {
                Some(parent_id) => self.path_title(Some(parent_id)).await?,
                None => NO_PARENT.to_string(),
            };
            let folder = self
                .folder_repo
                .find_with_groups(folder.id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Folder {} not found", folder.id)))?;
            entries.push(FolderListEntry {
                folder,
                title,
                parent_title,
            });
        }
        entries.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(entries)
    }

    /// Data for the add (`None`) or modify (`Some`) form.
    pub async fn form(&self, ctx: &RequestContext, folder_id: Option<i64>) -> AppResult<FolderForm> {
        self.access.require_folder_admin(ctx)?;

        let (current, excluded) = match folder_id {
            Some(id) => {
                let folder = self
                    .folder_repo
                    .find_with_groups(id)
                    .await?
                    .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))?;
                (Some(folder), self.folder_repo.find_subtree_ids(id).await?)
            }
            None => (None, Vec::new()),
        };

        let mut parents = Vec::new();
        for folder in self.folder_repo.find_all().await? {
            if !excluded.contains(&folder.id) {
                parents.push((folder.id, self.path_title(Some(folder.id)).await?));
            }
        }
        parents.sort_by(|a, b| a.1.cmp(&b.1));

        Ok(FolderForm {
            current,
            parents,
            groups: self.group_repo.find_all().await?,
        })
    }

    /// Adds (`folder_id` None) or modifies a folder, replacing both group sets.
    pub async fn save(
        &self,
        ctx: &RequestContext,
        folder_id: Option<i64>,
        mut input: FolderInput,
    ) -> AppResult<FolderWithGroups> {
        self.access.require_folder_admin(ctx)?;

        input.name = input.name.trim().to_string();
        if input.name.is_empty() {
            return Err(AppError::validation("Folder name cannot be empty"));
        }
        normalize_ids(&mut input.viewer);
        normalize_ids(&mut input.modifier);

        if let Some(parent_id) = input.parent_id {
            self.folder_repo
                .find_by_id(parent_id)
                .await?
                .ok_or_else(|| AppError::validation(format!("Parent folder {parent_id} not found")))?;
            if let Some(id) = folder_id {
                if self.folder_repo.find_subtree_ids(id).await?.contains(&parent_id) {
                    return Err(AppError::validation(
                        "A folder cannot be moved below itself or one of its sub-folders",
                    ));
                }
            }
        }

        let saved = match folder_id {
            Some(id) => self.folder_repo.update(id, &input).await?,
            None => self.folder_repo.create(&input).await?,
        };

        info!(
            user_id = ctx.user_id,
            folder_id = saved.folder.id,
            name = %saved.folder.name,
            created = folder_id.is_none(),
            "Folder saved"
        );
        Ok(saved)
    }

    /// Deletes folders with their sub-folders, documents, and stored content.
    ///
    /// Returns the number of folders removed, descendants included.
    pub async fn delete(&self, ctx: &RequestContext, folder_ids: &[i64]) -> AppResult<usize> {
        self.access.require_folder_admin(ctx)?;
        if folder_ids.is_empty() {
            return Err(AppError::validation("No folder selected"));
        }

        for &id in folder_ids {
            if self.folder_repo.find_by_id(id).await?.is_none() {
                return Err(AppError::not_found(format!("Folder {id} not found")));
            }
        }

        let mut subtree = Vec::new();
        for &id in folder_ids {
            subtree.extend(self.folder_repo.find_subtree_ids(id).await?);
        }
        subtree.sort_unstable();
        subtree.dedup();
        let document_ids = self.document_repo.find_ids_in_folders(&subtree).await?;

        self.folder_repo.delete_many(folder_ids).await?;
        self.store.remove_all(&document_ids).await;

        info!(
            user_id = ctx.user_id,
            ?folder_ids,
            folders = subtree.len(),
            documents = document_ids.len(),
            "Folders deleted"
        );
        Ok(subtree.len())
    }
}

fn normalize_ids(ids: &mut Vec<i64>) {
    ids.retain(|id| *id > 0);
    ids.sort_unstable();
    ids.dedup();
}
