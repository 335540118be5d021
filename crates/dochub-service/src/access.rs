//! Folder access rules.
//!
//! Superusers may do everything. Managing folders themselves is reserved to
//! superusers. Inside a folder, a user may see documents when one of their
//! groups is a viewer or modifier of the folder, and change documents when
//! one of their groups is a modifier. The root level is open to every
//! authenticated user.

use std::sync::Arc;

use dochub_core::error::AppError;
use dochub_core::result::AppResult;
use dochub_database::repositories::FolderRepository;
use dochub_entity::folder::FolderWithGroups;

use crate::context::RequestContext;

/// The two rights a folder grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderRight {
    /// See the folder and read its documents.
    View,
    /// Add, change, and delete documents in the folder.
    Modify,
}

/// Whether `ctx` holds `right` on `folder` (None for the root level).
pub fn has_right(ctx: &RequestContext, folder: Option<&FolderWithGroups>, right: FolderRight) -> bool {
    if ctx.is_superuser {
        return true;
    }
    let Some(folder) = folder else {
        return true;
    };
    match right {
        FolderRight::View => {
            folder.is_viewer(&ctx.group_ids) || folder.is_modifier(&ctx.group_ids)
        }
        FolderRight::Modify => folder.is_modifier(&ctx.group_ids),
    }
}

/// Resolves folders and enforces the access rules on them.
#[derive(Debug, Clone)]
pub struct AccessService {
    /// Folder repository.
    folder_repo: Arc<FolderRepository>,
}

impl AccessService {
    /// Creates a new access service.
    pub fn new(folder_repo: Arc<FolderRepository>) -> Self {
        Self { folder_repo }
    }

    /// Fails unless the user may manage folders.
    pub fn require_folder_admin(&self, ctx: &RequestContext) -> AppResult<()> {
        if ctx.is_superuser {
            Ok(())
        } else {
            Err(AppError::authorization("Folder management requires a superuser"))
        }
    }

    /// Loads `folder_id` (None for the root level) and checks `right` on it.
    ///
    /// Returns the loaded folder so callers need not fetch it twice.
    pub async fn require(
        &self,
        ctx: &RequestContext,
        folder_id: Option<i64>,
        right: FolderRight,
    ) -> AppResult<Option<FolderWithGroups>> {
        let folder = match folder_id {
            Some(id) => Some(
                self.folder_repo
                    .find_with_groups(id)
                    .await?
                    .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))?,
            ),
            None => None,
        };

        if !has_right(ctx, folder.as_ref(), right) {
            let action = match right {
                FolderRight::View => "view",
                FolderRight::Modify => "modify",
            };
            return Err(AppError::authorization(format!(
                "You are not allowed to {action} this folder"
            )));
        }
        Ok(folder)
    }
}
