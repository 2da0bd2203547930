//! `SeaORM` implementation of the `WatchlistService` trait.

use crate::db::Store;
use crate::models::watchlist::WatchCategory;
use crate::services::watchlist_service::{WatchlistError, WatchlistService};
use async_trait::async_trait;
use tracing::info;

pub struct SeaOrmWatchlistService {
    store: Store,
}

impl SeaOrmWatchlistService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Resolves the caller's profile and watch list, creating both on first
    /// use, together with the target anime.
    async fn resolve(
        &self,
        user_id: i32,
        slug: &str,
    ) -> Result<(i32, i32, i32), WatchlistError> {
        let anime = self
            .store
            .get_anime_by_slug(slug)
            .await?
            .ok_or_else(|| WatchlistError::AnimeNotFound(slug.to_string()))?;

        self.store
            .get_user_by_id(user_id)
            .await?
            .ok_or(WatchlistError::UserNotFound)?;

        let profile = self.store.ensure_profile(user_id).await?;
        let list = self.store.ensure_watch_list(profile.id).await?;

        Ok((list.id, profile.id, anime.id))
    }
}

#[async_trait]
impl WatchlistService for SeaOrmWatchlistService {
    async fn set_category(
        &self,
        user_id: i32,
        slug: &str,
        category: WatchCategory,
    ) -> Result<Option<WatchCategory>, WatchlistError> {
        let (list_id, profile_id, anime_id) = self.resolve(user_id, slug).await?;

        let result = self
            .store
            .set_watch_category(list_id, profile_id, anime_id, category)
            .await?;

        info!(
            user = user_id,
            anime = %slug,
            category = %category,
            now_in = result.map_or("none", WatchCategory::as_str),
            "Watch category toggled"
        );

        Ok(result)
    }

    async fn toggle_favorite(&self, user_id: i32, slug: &str) -> Result<bool, WatchlistError> {
        let (list_id, profile_id, anime_id) = self.resolve(user_id, slug).await?;

        let is_favorite = self
            .store
            .toggle_favorite(list_id, profile_id, anime_id)
            .await?;

        info!(user = user_id, anime = %slug, is_favorite, "Favorite toggled");

        Ok(is_favorite)
    }
}
