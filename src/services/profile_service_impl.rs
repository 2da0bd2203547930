//! `SeaORM` implementation of the `ProfileService` trait.

use crate::api::types::{AnimeDto, UserProfileDto, WatchShelvesDto};
use crate::db::{ProfileChanges, Store};
use crate::models::watchlist::WatchCategory;
use crate::services::profile_service::{ProfileError, ProfileService};
use async_trait::async_trait;
use tracing::info;

pub struct SeaOrmProfileService {
    store: Store,
}

impl SeaOrmProfileService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    async fn shelf(
        &self,
        profile_id: i32,
        category: WatchCategory,
    ) -> Result<Vec<AnimeDto>, ProfileError> {
        let rows = self.store.list_watch_category(profile_id, category).await?;
        Ok(rows.into_iter().map(AnimeDto::from).collect())
    }

    async fn build_view(&self, profile_id: i32) -> Result<UserProfileDto, ProfileError> {
        let profile = self
            .store
            .get_profile(profile_id)
            .await?
            .ok_or(ProfileError::NotFound(profile_id))?;

        let username = self
            .store
            .get_user_by_id(profile.user_id)
            .await?
            .map_or_else(String::new, |u| u.username);

        let favorites = self.store.list_favorites(profile.id).await?;

        let shelves = WatchShelvesDto {
            watching: self.shelf(profile.id, WatchCategory::Watching).await?,
            will_watch: self.shelf(profile.id, WatchCategory::WillWatch).await?,
            viewed: self.shelf(profile.id, WatchCategory::Viewed).await?,
            dropped: self.shelf(profile.id, WatchCategory::Dropped).await?,
            favorites: favorites.into_iter().map(AnimeDto::from).collect(),
        };

        Ok(UserProfileDto {
            id: profile.id,
            user_id: profile.user_id,
            username,
            bio: profile.bio,
            birth_date: profile.birth_date,
            sex: profile.sex,
            avatar: profile.avatar,
            shelves,
        })
    }
}

#[async_trait]
impl ProfileService for SeaOrmProfileService {
    async fn view(&self, profile_id: i32) -> Result<UserProfileDto, ProfileError> {
        self.build_view(profile_id).await
    }

    async fn update(
        &self,
        user_id: i32,
        profile_id: i32,
        changes: ProfileChanges,
    ) -> Result<UserProfileDto, ProfileError> {
        let profile = self
            .store
            .get_profile(profile_id)
            .await?
            .ok_or(ProfileError::NotFound(profile_id))?;

        if profile.user_id != user_id {
            return Err(ProfileError::PermissionDenied(
                "Only the owner can edit a profile".to_string(),
            ));
        }

        if let Some(bio) = &changes.bio {
            if bio.chars().count() > 1000 {
                return Err(ProfileError::Validation(
                    "Bio must not exceed 1000 characters".to_string(),
                ));
            }
        }

        self.store.update_profile(profile_id, changes).await?;

        info!(user = user_id, profile = profile_id, "Profile updated");

        self.build_view(profile_id).await
    }
}
