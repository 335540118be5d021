//! Folder repository implementation.

use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::debug;

use dochub_core::error::{AppError, ErrorKind};
use dochub_core::result::AppResult;
use dochub_entity::folder::{Folder, FolderInput, FolderWithGroups};

/// Upper bound on tree depth walked by the recursive queries.
const MAX_DEPTH: i64 = 256;

/// Which group set of a folder to read or replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GroupSet {
    Viewer,
    Modifier,
}

impl GroupSet {
    fn table(self) -> &'static str {
        match self {
            Self::Viewer => "folder_viewers",
            Self::Modifier => "folder_modifiers",
        }
    }
}

/// Repository for folder CRUD, group sets, and tree queries.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    pool: SqlitePool,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a folder by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT id, name, description, parent_id FROM folders WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    /// Find a folder with its viewer and modifier groups.
    pub async fn find_with_groups(&self, id: i64) -> AppResult<Option<FolderWithGroups>> {
        match self.find_by_id(id).await? {
            Some(folder) => Ok(Some(self.attach_groups(folder).await?)),
            None => Ok(None),
        }
    }

    /// List every folder, ordered by name.
    pub async fn find_all(&self) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT id, name, description, parent_id FROM folders ORDER BY name ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list folders", e))
    }

    /// List the direct children of a folder, or the top-level folders when
    /// `parent_id` is None.
    pub async fn find_children(&self, parent_id: Option<i64>) -> AppResult<Vec<FolderWithGroups>> {
        let folders = sqlx::query_as::<_, Folder>(
            "SELECT id, name, description, parent_id FROM folders \
             WHERE parent_id IS ? ORDER BY name ASC, id ASC",
        )
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list children", e))?;

        let mut result = Vec::with_capacity(folders.len());
        for folder in folders {
            result.push(self.attach_groups(folder).await?);
        }
        Ok(result)
    }

    /// The ancestor chain of a folder, starting with the folder itself and
    /// ending with its top-level ancestor.
    pub async fn find_ancestors(&self, folder_id: i64) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "WITH RECURSIVE ancestors(id, name, description, parent_id, depth) AS ( \
                SELECT id, name, description, parent_id, 0 FROM folders WHERE id = ? \
                UNION ALL \
                SELECT f.id, f.name, f.description, f.parent_id, a.depth + 1 \
                FROM folders f INNER JOIN ancestors a ON f.id = a.parent_id \
                WHERE a.depth < ? \
             ) SELECT id, name, description, parent_id FROM ancestors ORDER BY depth ASC",
        )
        .bind(folder_id)
        .bind(MAX_DEPTH)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find ancestors", e))
    }

    /// IDs of a folder and all of its descendants.
    pub async fn find_subtree_ids(&self, folder_id: i64) -> AppResult<Vec<i64>> {
        sqlx::query_scalar::<_, i64>(
            "WITH RECURSIVE tree(id, depth) AS ( \
                SELECT id, 0 FROM folders WHERE id = ? \
                UNION ALL \
                SELECT f.id, t.depth + 1 FROM folders f INNER JOIN tree t ON f.parent_id = t.id \
                WHERE t.depth < ? \
             ) SELECT id FROM tree ORDER BY depth ASC, id ASC",
        )
        .bind(folder_id)
        .bind(MAX_DEPTH)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list descendants", e))
    }

    /// Create a folder and its group sets in one transaction.
    pub async fn create(&self, data: &FolderInput) -> AppResult<FolderWithGroups> {
        let mut tx = self.begin().await?;

        let id = sqlx::query("INSERT INTO folders (name, description, parent_id) VALUES (?, ?, ?)")
            .bind(&data.name)
            .bind(&data.description)
            .bind(data.parent_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create folder", e))?
            .last_insert_rowid();

        replace_groups(&mut tx, id, GroupSet::Viewer, &data.viewer).await?;
        replace_groups(&mut tx, id, GroupSet::Modifier, &data.modifier).await?;
        commit(tx).await?;

        debug!(folder_id = id, "Inserted folder");
        self.find_with_groups(id)
            .await?
            .ok_or_else(|| AppError::internal(format!("Folder {id} vanished after insert")))
    }

    /// Update a folder and replace its group sets in one transaction.
    pub async fn update(&self, folder_id: i64, data: &FolderInput) -> AppResult<FolderWithGroups> {
        let mut tx = self.begin().await?;

        let affected =
            sqlx::query("UPDATE folders SET name = ?, description = ?, parent_id = ? WHERE id = ?")
                .bind(&data.name)
                .bind(&data.description)
                .bind(data.parent_id)
                .bind(folder_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to update folder", e)
                })?
                .rows_affected();

        if affected == 0 {
            return Err(AppError::not_found(format!("Folder {folder_id} not found")));
        }

        replace_groups(&mut tx, folder_id, GroupSet::Viewer, &data.viewer).await?;
        replace_groups(&mut tx, folder_id, GroupSet::Modifier, &data.modifier).await?;
        commit(tx).await?;

        debug!(folder_id, "Updated folder");
        self.find_with_groups(folder_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))
    }

    /// Delete folders in one transaction (cascades to sub-folders,
    /// documents, and group sets). Returns how many listed ids matched a row;
    /// an id inside an already deleted sub-tree matches nothing.
    pub async fn delete_many(&self, folder_ids: &[i64]) -> AppResult<u64> {
        let mut tx = self.begin().await?;
        let mut deleted = 0;
        for folder_id in folder_ids {
            let result = sqlx::query("DELETE FROM folders WHERE id = ?")
                .bind(folder_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to delete folder", e)
                })?;
            deleted += result.rows_affected();
        }
        commit(tx).await?;

        debug!(?folder_ids, deleted, "Deleted folders");
        Ok(deleted)
    }

    /// Count all folders.
    pub async fn count(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM folders")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count folders", e))
    }

    async fn attach_groups(&self, folder: Folder) -> AppResult<FolderWithGroups> {
        let viewer = self.group_ids(folder.id, GroupSet::Viewer).await?;
        let modifier = self.group_ids(folder.id, GroupSet::Modifier).await?;
        Ok(FolderWithGroups {
            folder,
            viewer,
            modifier,
        })
    }

    async fn group_ids(&self, folder_id: i64, set: GroupSet) -> AppResult<Vec<i64>> {
        let sql = format!(
            "SELECT group_id FROM {} WHERE folder_id = ? ORDER BY group_id ASC",
            set.table()
        );
        sqlx::query_scalar::<_, i64>(&sql)
            .bind(folder_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to read folder groups", e)
            })
    }

    async fn begin(&self) -> AppResult<Transaction<'static, Sqlite>> {
        self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to start transaction", e)
        })
    }
}

async fn replace_groups(
    tx: &mut Transaction<'static, Sqlite>,
    folder_id: i64,
    set: GroupSet,
    group_ids: &[i64],
) -> AppResult<()> {
    let delete = format!("DELETE FROM {} WHERE folder_id = ?", set.table());
    sqlx::query(&delete)
        .bind(folder_id)
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to clear folder groups", e))?;

    let insert = format!(
        "INSERT OR IGNORE INTO {} (folder_id, group_id) VALUES (?, ?)",
        set.table()
    );
    for group_id in group_ids {
        sqlx::query(&insert)
            .bind(folder_id)
            .bind(group_id)
            .execute(&mut **tx)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                    AppError::validation(format!("Group {group_id} does not exist"))
                }
                _ => AppError::with_source(ErrorKind::Database, "Failed to add folder group", e),
            })?;
    }
    Ok(())
}

async fn commit(tx: Transaction<'static, Sqlite>) -> AppResult<()> {
    tx.commit()
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::group::GroupRepository;
    use crate::repositories::test_support::memory_pool;

    fn input(name: &str, parent_id: Option<i64>, viewer: Vec<i64>, modifier: Vec<i64>) -> FolderInput {
        FolderInput {
            name: name.to_string(),
            description: format!("{name} description"),
            parent_id,
            viewer,
            modifier,
        }
    }

    async fn seeded() -> (FolderRepository, SqlitePool) {
        let pool = memory_pool().await;
        let groups = GroupRepository::new(pool.clone());
        groups.create("my_group").await.unwrap();
        groups.create("other_group").await.unwrap();
        (FolderRepository::new(pool.clone()), pool)
    }

    #[tokio::test]
    async fn test_create_with_groups() {
        let (repo, _pool) = seeded().await;
        let created = repo
            .create(&input("newcat", None, vec![2, 1], vec![2]))
            .await
            .unwrap();
        assert_eq!(created.folder.id, 1);
        assert_eq!(created.folder.parent_id, None);
        assert_eq!(created.viewer, vec![1, 2]);
        assert_eq!(created.modifier, vec![2]);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unknown_group_is_rejected_atomically() {
        let (repo, _pool) = seeded().await;
        let err = repo
            .create(&input("bad", None, vec![1, 9], vec![]))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_replaces_group_sets() {
        let (repo, _pool) = seeded().await;
        let created = repo.create(&input("a", None, vec![1, 2], vec![2])).await.unwrap();
        let updated = repo
            .update(created.folder.id, &input("b", None, vec![2], vec![]))
            .await
            .unwrap();
        assert_eq!(updated.folder.name, "b");
        assert_eq!(updated.viewer, vec![2]);
        assert!(updated.modifier.is_empty());

        let missing = repo.update(42, &input("c", None, vec![], vec![])).await;
        assert_eq!(missing.unwrap_err().kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_tree_queries() {
        let (repo, _pool) = seeded().await;
        let truc1 = repo.create(&input("truc1", None, vec![], vec![])).await.unwrap();
        let truc2 = repo.create(&input("truc2", None, vec![], vec![])).await.unwrap();
        let truc3 = repo
            .create(&input("truc3", Some(truc2.folder.id), vec![], vec![]))
            .await
            .unwrap();

        let roots = repo.find_children(None).await.unwrap();
        let names: Vec<_> = roots.iter().map(|f| f.folder.name.as_str()).collect();
        assert_eq!(names, vec!["truc1", "truc2"]);

        let children = repo.find_children(Some(truc2.folder.id)).await.unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].folder.id, truc3.folder.id);

        let ancestors = repo.find_ancestors(truc3.folder.id).await.unwrap();
        let ids: Vec<_> = ancestors.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![truc3.folder.id, truc2.folder.id]);

        let subtree = repo.find_subtree_ids(truc2.folder.id).await.unwrap();
        assert_eq!(subtree, vec![truc2.folder.id, truc3.folder.id]);

        assert!(repo.find_children(Some(truc1.folder.id)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_cascades_to_children() {
        let (repo, _pool) = seeded().await;
        let parent = repo.create(&input("p", None, vec![1], vec![])).await.unwrap();
        repo.create(&input("c", Some(parent.folder.id), vec![1], vec![]))
            .await
            .unwrap();

        let child = repo.find_subtree_ids(parent.folder.id).await.unwrap()[1];

        assert_eq!(repo.delete_many(&[parent.folder.id, child]).await.unwrap(), 1);
        assert_eq!(repo.count().await.unwrap(), 0);
        assert_eq!(repo.delete_many(&[parent.folder.id]).await.unwrap(), 0);
    }
}
