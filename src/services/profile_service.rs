//! Domain service for public user profiles.
//!
//! A profile page shows the owner's bio next to the four watch-category
//! shelves and the favorites shelf.

use crate::api::types::UserProfileDto;
use crate::db::ProfileChanges;
use thiserror::Error;

/// Errors specific to profile operations.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Profile not found: {0}")]
    NotFound(i32),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for ProfileError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for ProfileError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Domain service trait for profiles.
#[async_trait::async_trait]
pub trait ProfileService: Send + Sync {
    /// Public view of a profile with its shelves.
    async fn view(&self, profile_id: i32) -> Result<UserProfileDto, ProfileError>;

    /// Applies partial changes to a profile. Only the owner may edit it.
    async fn update(
        &self,
        user_id: i32,
        profile_id: i32,
        changes: ProfileChanges,
    ) -> Result<UserProfileDto, ProfileError>;
}
