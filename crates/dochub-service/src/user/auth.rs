//! Login and bearer token authentication.

use std::sync::Arc;

use tracing::{info, warn};

use dochub_auth::jwt::AccessToken;
use dochub_auth::{JwtDecoder, JwtEncoder, PasswordHasher};
use dochub_core::error::AppError;
use dochub_core::result::AppResult;
use dochub_database::repositories::{GroupRepository, UserRepository};
use dochub_entity::user::User;

use crate::context::RequestContext;

/// Result of a successful login.
#[derive(Debug, Clone, serde::Serialize)]
pub struct LoginResult {
    /// The authenticated user.
    pub user: User,
    /// The issued access token.
    pub token: AccessToken,
}

/// Authenticates users by password and by access token.
#[derive(Debug, Clone)]
pub struct AuthService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Group repository.
    group_repo: Arc<GroupRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Token encoder.
    encoder: Arc<JwtEncoder>,
    /// Token decoder.
    decoder: Arc<JwtDecoder>,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        group_repo: Arc<GroupRepository>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
    ) -> Self {
        Self {
            user_repo,
            group_repo,
            hasher,
            encoder,
            decoder,
        }
    }

    /// Checks credentials and issues an access token.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<LoginResult> {
        let user = self.user_repo.find_by_username(username).await?;
        let user = match user {
            Some(user) if self.hasher.verify_password(password, &user.password_hash) => user,
            _ => {
                warn!(username, "Failed login attempt");
                return Err(AppError::authentication("Invalid username or password"));
            }
        };
        if !user.is_active {
            return Err(AppError::authentication("Account is disabled"));
        }

        let token = self.encoder.generate_access_token(user.id, &user.username)?;
        info!(user_id = user.id, username = %user.username, "User logged in");
        Ok(LoginResult { user, token })
    }

    /// Issues a token for `user` without a password check.
    pub fn issue_token(&self, user: &User) -> AppResult<AccessToken> {
        self.encoder.generate_access_token(user.id, &user.username)
    }

    /// Validates a bearer token and builds the request context.
    ///
    /// The user is reloaded so that deactivation and group changes take
    /// effect immediately.
    pub async fn authenticate(&self, token: &str) -> AppResult<RequestContext> {
        let claims = self.decoder.decode_access_token(token)?;
        let user = self
            .user_repo
            .find_by_id(claims.user_id())
            .await?
            .filter(|u| u.is_active)
            .ok_or_else(|| AppError::authentication("Unknown or disabled user"))?;
        let group_ids = self.group_repo.group_ids_for_user(user.id).await?;
        Ok(RequestContext::new(&user, group_ids))
    }

    /// The user behind a request context.
    pub async fn current_user(&self, ctx: &RequestContext) -> AppResult<User> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}

#[cfg(test)]
mod tests {
    use dochub_core::config::AuthConfig;
    use dochub_core::error::ErrorKind;

    use super::*;
    use crate::test_support::Fixture;
    use crate::user::service::{NewUser, UserService};

    async fn setup() -> (Fixture, AuthService) {
        let fx = Fixture::new().await;
        let config = AuthConfig::default();
        let hasher = Arc::new(PasswordHasher::new());
        let users = UserService::new(Arc::clone(&fx.users), Arc::clone(&fx.groups), Arc::clone(&hasher));
        users
            .create_user(NewUser {
                username: "empty".into(),
                password: "secret".into(),
                first_name: String::new(),
                last_name: String::new(),
                is_superuser: false,
            })
            .await
            .unwrap();
        users.join_group("empty", "my_group").await.unwrap();

        let auth = AuthService::new(
            Arc::clone(&fx.users),
            Arc::clone(&fx.groups),
            hasher,
            Arc::new(JwtEncoder::new(&config)),
            Arc::new(JwtDecoder::new(&config)),
        );
        (fx, auth)
    }

    #[tokio::test]
    async fn test_login_and_authenticate() {
        let (_fx, auth) = setup().await;
        let login = auth.login("empty", "secret").await.unwrap();
        let ctx = auth.authenticate(&login.token.access_token).await.unwrap();
        assert_eq!(ctx.username, "empty");
        assert_eq!(ctx.group_ids, vec![1]);
        assert!(!ctx.is_superuser);
        assert_eq!(auth.current_user(&ctx).await.unwrap().id, login.user.id);
    }

    #[tokio::test]
    async fn test_bad_credentials() {
        let (_fx, auth) = setup().await;
        for (user, pass) in [("empty", "wrong"), ("nobody", "secret")] {
            let err = auth.login(user, pass).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::Authentication);
        }
        let err = auth.authenticate("garbage").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }
}
