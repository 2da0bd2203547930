//! Domain service for comments and ratings.

use crate::api::types::CommentDto;
use thiserror::Error;

/// Longest accepted comment body.
pub const COMMENT_MAX_LEN: usize = 500;

/// Errors specific to community operations.
#[derive(Debug, Error)]
pub enum CommunityError {
    #[error("Anime not found: {0}")]
    AnimeNotFound(String),

    #[error("Comment not found: {0}")]
    CommentNotFound(i32),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for CommunityError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for CommunityError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Domain service trait for comments and ratings.
#[async_trait::async_trait]
pub trait CommunityService: Send + Sync {
    /// Posts a comment on a title, optionally replying to a parent comment
    /// on the same title.
    async fn add_comment(
        &self,
        user_id: i32,
        slug: &str,
        parent_id: Option<i32>,
        text: &str,
    ) -> Result<CommentDto, CommunityError>;

    /// Deletes a comment. Only the author may delete it.
    async fn delete_comment(&self, user_id: i32, comment_id: i32) -> Result<(), CommunityError>;

    /// All comments on a title, newest first.
    async fn list_comments(&self, slug: &str) -> Result<Vec<CommentDto>, CommunityError>;

    /// Sets the caller's star rating (1..=10) for a title. Re-rating
    /// overwrites the previous value.
    async fn rate(&self, user_id: i32, slug: &str, star: i32) -> Result<(), CommunityError>;
}
