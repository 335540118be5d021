//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::SqlitePool;

use dochub_auth::{JwtDecoder, JwtEncoder, PasswordHasher};
use dochub_core::config::AppConfig;
use dochub_core::result::AppResult;
use dochub_database::DatabasePool;
use dochub_database::repositories::{
    DocumentRepository, FolderRepository, GroupRepository, UserRepository,
};
use dochub_service::{AuthService, DocumentService, FolderService, UserService};
use dochub_storage::{DocumentStore, LocalStorageProvider};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// SQLite connection pool
    pub db: DatabasePool,
    /// Document content store
    pub store: DocumentStore,

    // ── Services ─────────────────────────────────────────────
    /// Folder management
    pub folder_service: Arc<FolderService>,
    /// Document management
    pub document_service: Arc<DocumentService>,
    /// Login and token validation
    pub auth_service: Arc<AuthService>,
    /// Accounts and groups
    pub user_service: Arc<UserService>,
}

impl AppState {
    /// Wire every repository and service over `pool`.
    ///
    /// Document content is stored below the configured user directory,
    /// which is created when missing.
    pub async fn build(config: AppConfig, pool: SqlitePool) -> AppResult<Self> {
        let provider = LocalStorageProvider::new(config.storage.user_dir()).await?;
        let store = DocumentStore::new(Arc::new(provider));

        let folder_repo = Arc::new(FolderRepository::new(pool.clone()));
        let document_repo = Arc::new(DocumentRepository::new(pool.clone()));
        let group_repo = Arc::new(GroupRepository::new(pool.clone()));
        let user_repo = Arc::new(UserRepository::new(pool.clone()));

        let hasher = Arc::new(PasswordHasher::default());
        let encoder = Arc::new(JwtEncoder::new(&config.auth));
        let decoder = Arc::new(JwtDecoder::new(&config.auth));

        let folder_service = Arc::new(FolderService::new(
            Arc::clone(&folder_repo),
            Arc::clone(&document_repo),
            Arc::clone(&group_repo),
            store.clone(),
        ));
        let document_service = Arc::new(DocumentService::new(
            document_repo,
            folder_repo,
            Arc::clone(&user_repo),
            store.clone(),
            config.storage.max_upload_size_bytes,
        ));
        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&user_repo),
            Arc::clone(&group_repo),
            Arc::clone(&hasher),
            encoder,
            decoder,
        ));
        let user_service = Arc::new(UserService::new(user_repo, group_repo, hasher));

        Ok(Self {
            config: Arc::new(config),
            db: DatabasePool::from_pool(pool),
            store,
            folder_service,
            document_service,
            auth_service,
            user_service,
        })
    }
}
