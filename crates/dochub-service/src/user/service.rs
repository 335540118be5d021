//! User and group administration.

use std::sync::Arc;

use tracing::info;

use dochub_auth::PasswordHasher;
use dochub_core::config::AuthConfig;
use dochub_core::error::AppError;
use dochub_core::result::AppResult;
use dochub_database::repositories::{GroupRepository, UserRepository};
use dochub_entity::group::Group;
use dochub_entity::user::{CreateUser, User};

/// Data for a new account.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct NewUser {
    /// Login name.
    pub username: String,
    /// Plaintext password, hashed before storage.
    pub password: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Superuser flag.
    pub is_superuser: bool,
}

/// Administrative operations on users and groups.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Group repository.
    group_repo: Arc<GroupRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        group_repo: Arc<GroupRepository>,
        hasher: Arc<PasswordHasher>,
    ) -> Self {
        Self {
            user_repo,
            group_repo,
            hasher,
        }
    }

    /// Creates a user account.
    pub async fn create_user(&self, new: NewUser) -> AppResult<User> {
        let username = new.username.trim().to_string();
        if username.is_empty() {
            return Err(AppError::validation("Username cannot be empty"));
        }
        let password_hash = self.hasher.hash_password(&new.password)?;

        let user = self
            .user_repo
            .create(&CreateUser {
                username,
                first_name: new.first_name,
                last_name: new.last_name,
                password_hash,
                is_superuser: new.is_superuser,
            })
            .await?;

        info!(user_id = user.id, username = %user.username, "User created");
        Ok(user)
    }

    /// Every user, ordered by username.
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        self.user_repo.find_all().await
    }

    /// Creates an access group.
    pub async fn create_group(&self, name: &str) -> AppResult<Group> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Group name cannot be empty"));
        }
        let group = self.group_repo.create(name).await?;
        info!(group_id = group.id, name = %group.name, "Group created");
        Ok(group)
    }

    /// Every group, in creation order.
    pub async fn list_groups(&self) -> AppResult<Vec<Group>> {
        self.group_repo.find_all().await
    }

    /// Adds the user `username` to the group `group_name`.
    pub async fn join_group(&self, username: &str, group_name: &str) -> AppResult<()> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User '{username}' not found")))?;
        let group = self
            .group_repo
            .find_by_name(group_name)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Group '{group_name}' not found")))?;

        self.group_repo.add_member(group.id, user.id).await?;
        info!(user_id = user.id, group_id = group.id, "User joined group");
        Ok(())
    }

    /// Creates the configured superuser when no account exists yet.
    ///
    /// Returns the created user, or None when accounts already exist or no
    /// bootstrap password is configured.
    pub async fn bootstrap_admin(&self, config: &AuthConfig) -> AppResult<Option<User>> {
        if self.user_repo.count().await? > 0 {
            return Ok(None);
        }
        if config.bootstrap_admin_password.is_empty() {
            info!("No users and no bootstrap password configured; skipping admin bootstrap");
            return Ok(None);
        }

        let user = self
            .create_user(NewUser {
                username: config.bootstrap_admin_username.clone(),
                password: config.bootstrap_admin_password.clone(),
                first_name: String::new(),
                last_name: String::new(),
                is_superuser: true,
            })
            .await?;
        info!(username = %user.username, "Bootstrap superuser created");
        Ok(Some(user))
    }
}
