//! Shared fixtures for service tests.

use std::sync::Arc;

use dochub_core::config::DatabaseConfig;
use dochub_database::DatabasePool;
use dochub_database::migration::run_migrations;
use dochub_database::repositories::{
    DocumentRepository, FolderRepository, GroupRepository, UserRepository,
};
use dochub_entity::folder::FolderInput;
use dochub_entity::user::CreateUser;
use dochub_storage::slots::{document_slot, user_dir};
use dochub_storage::{DocumentStore, LocalStorageProvider};

use crate::context::RequestContext;

pub struct Fixture {
    pub dir: tempfile::TempDir,
    pub folders: Arc<FolderRepository>,
    pub documents: Arc<DocumentRepository>,
    pub groups: Arc<GroupRepository>,
    pub users: Arc<UserRepository>,
    pub store: DocumentStore,
}

impl Fixture {
    /// Fresh database with `my_group` (1) and `other_group` (2).
    pub async fn new() -> Self {
        let db = DatabasePool::connect(&DatabaseConfig::in_memory())
            .await
            .unwrap();
        run_migrations(db.pool()).await.unwrap();
        let pool = db.into_pool();

        let dir = tempfile::tempdir().unwrap();
        let provider = LocalStorageProvider::new(user_dir(dir.path())).await.unwrap();

        let fixture = Self {
            folders: Arc::new(FolderRepository::new(pool.clone())),
            documents: Arc::new(DocumentRepository::new(pool.clone())),
            groups: Arc::new(GroupRepository::new(pool.clone())),
            users: Arc::new(UserRepository::new(pool)),
            store: DocumentStore::new(Arc::new(provider)),
            dir,
        };
        fixture.groups.create("my_group").await.unwrap();
        fixture.groups.create("other_group").await.unwrap();
        fixture
    }

    /// The folder tree `truc1`, `truc2` and `truc2>truc3`.
    pub async fn with_tree() -> Self {
        let fixture = Self::new().await;
        fixture.folder("truc1", "blabla", None, vec![1, 2], vec![2]).await;
        fixture.folder("truc2", "bouuuuu!", None, vec![2], vec![2]).await;
        fixture.folder("truc3", "----", Some(2), vec![], vec![]).await;
        fixture
    }

    pub async fn folder(
        &self,
        name: &str,
        description: &str,
        parent_id: Option<i64>,
        viewer: Vec<i64>,
        modifier: Vec<i64>,
    ) -> i64 {
        self.folders
            .create(&FolderInput {
                name: name.into(),
                description: description.into(),
                parent_id,
                viewer,
                modifier,
            })
            .await
            .unwrap()
            .folder
            .id
    }

    /// Path of a document slot on disk.
    pub fn slot(&self, document_id: i64) -> std::path::PathBuf {
        user_dir(self.dir.path()).join(document_slot(document_id))
    }

    /// Creates a user in `groups` and returns its request context.
    pub async fn user(&self, username: &str, is_superuser: bool, groups: &[i64]) -> RequestContext {
        let user = self
            .users
            .create(&CreateUser {
                username: username.into(),
                first_name: String::new(),
                last_name: String::new(),
                password_hash: "unused".into(),
                is_superuser,
            })
            .await
            .unwrap();
        for group in groups {
            self.groups.add_member(*group, user.id).await.unwrap();
        }
        RequestContext::new(&user, groups.to_vec())
    }
}
