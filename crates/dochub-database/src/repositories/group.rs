//! Group and membership repository implementation.

use sqlx::SqlitePool;
use tracing::debug;

use dochub_core::error::{AppError, ErrorKind};
use dochub_core::result::AppResult;
use dochub_entity::group::Group;

/// Repository for groups and user membership.
#[derive(Debug, Clone)]
pub struct GroupRepository {
    pool: SqlitePool,
}

impl GroupRepository {
    /// Create a new group repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List every group in creation order.
    pub async fn find_all(&self) -> AppResult<Vec<Group>> {
        sqlx::query_as::<_, Group>("SELECT id, name FROM access_groups ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list groups", e))
    }

    /// Find a group by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Group>> {
        sqlx::query_as::<_, Group>("SELECT id, name FROM access_groups WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find group", e))
    }

    /// Find a group by name.
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<Group>> {
        sqlx::query_as::<_, Group>("SELECT id, name FROM access_groups WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find group", e))
    }

    /// Create a new group.
    pub async fn create(&self, name: &str) -> AppResult<Group> {
        let result = sqlx::query_as::<_, Group>(
            "INSERT INTO access_groups (name) VALUES (?) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(group) => {
                debug!(group_id = group.id, name = %group.name, "Created group");
                Ok(group)
            }
            Err(sqlx::Error::Database(ref db_err)) if db_err.is_unique_violation() => Err(
                AppError::conflict(format!("Group '{name}' already exists")),
            ),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Database,
                "Failed to create group",
                e,
            )),
        }
    }

    /// IDs of the groups a user belongs to.
    pub async fn group_ids_for_user(&self, user_id: i64) -> AppResult<Vec<i64>> {
        sqlx::query_scalar::<_, i64>(
            "SELECT group_id FROM user_groups WHERE user_id = ? ORDER BY group_id ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to read user groups", e)
        })
    }

    /// Add a user to a group. Adding an existing member is a no-op.
    pub async fn add_member(&self, group_id: i64, user_id: i64) -> AppResult<()> {
        sqlx::query("INSERT OR IGNORE INTO user_groups (user_id, group_id) VALUES (?, ?)")
            .bind(user_id)
            .bind(group_id)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                    AppError::not_found(format!("Unknown group {group_id} or user {user_id}"))
                }
                _ => AppError::with_source(ErrorKind::Database, "Failed to add group member", e),
            })?;
        debug!(group_id, user_id, "Added group member");
        Ok(())
    }
}
