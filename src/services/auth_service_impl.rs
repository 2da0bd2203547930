//! `SeaORM` implementation of the `AuthService` trait.

use crate::db::Store;
use crate::services::auth_service::{AuthError, AuthService, LoginResult, UserInfo};
use async_trait::async_trait;
use tracing::info;

pub struct SeaOrmAuthService {
    store: Store,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn register(&self, username: &str, password: &str) -> Result<UserInfo, AuthError> {
        let username = username.trim();
        if username.is_empty() || username.len() > 64 {
            return Err(AuthError::Validation(
                "Username must be between 1 and 64 characters".to_string(),
            ));
        }
        if password.len() < 8 {
            return Err(AuthError::Validation(
                "Password must be at least 8 characters".to_string(),
            ));
        }

        if self.store.get_user_by_username(username).await?.is_some() {
            return Err(AuthError::UsernameTaken(username.to_string()));
        }

        let user = self.store.register_user(username, password).await?;
        let profile = self.store.ensure_profile(user.id).await?;

        info!(user = user.id, username = %user.username, "Account registered");

        Ok(UserInfo {
            id: user.id,
            username: user.username,
            profile_id: profile.id,
            created_at: user.created_at,
        })
    }

    async fn login(&self, username: &str, password: &str) -> Result<LoginResult, AuthError> {
        let is_valid = self.store.verify_user_password(username, password).await?;

        if !is_valid {
            return Err(AuthError::InvalidCredentials);
        }

        let user = self
            .store
            .get_user_by_username(username)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        // Legacy accounts may predate the profile row.
        self.store.ensure_profile(user.id).await?;

        Ok(LoginResult {
            id: user.id,
            username: user.username,
            api_key: user.api_key,
        })
    }

    async fn verify_api_key(&self, api_key: &str) -> Result<Option<i32>, AuthError> {
        let user = self.store.verify_api_key(api_key).await?;
        Ok(user.map(|u| u.id))
    }

    async fn get_user_info(&self, user_id: i32) -> Result<UserInfo, AuthError> {
        let user = self
            .store
            .get_user_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let profile = self.store.ensure_profile(user.id).await?;

        Ok(UserInfo {
            id: user.id,
            username: user.username,
            profile_id: profile.id,
            created_at: user.created_at,
        })
    }
}
