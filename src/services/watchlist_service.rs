//! Domain service for the per-user watch list.
//!
//! A title sits in at most one of the four watch categories at a time;
//! the favorite flag is tracked independently of the categories.

use crate::models::watchlist::WatchCategory;
use thiserror::Error;

/// Errors specific to watch-list operations.
#[derive(Debug, Error)]
pub enum WatchlistError {
    #[error("Anime not found: {0}")]
    AnimeNotFound(String),

    #[error("User not found")]
    UserNotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for WatchlistError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for WatchlistError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Domain service trait for watch lists.
#[async_trait::async_trait]
pub trait WatchlistService: Send + Sync {
    /// Toggles the title into (or out of) the given category.
    ///
    /// Returns the category the title ends up in: `Some(category)` when it
    /// was added, `None` when the same category was toggled off. Placing a
    /// title in a category removes it from any other category it was in.
    async fn set_category(
        &self,
        user_id: i32,
        slug: &str,
        category: WatchCategory,
    ) -> Result<Option<WatchCategory>, WatchlistError>;

    /// Flips the favorite flag and returns the new state.
    async fn toggle_favorite(&self, user_id: i32, slug: &str) -> Result<bool, WatchlistError>;
}
