use crate::entities::{anime, favorites, prelude::*, watch_list_entries, watch_lists};
use crate::models::watchlist::WatchCategory;
use anyhow::{Context, Result};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::debug;

pub struct WatchlistRepository {
    conn: DatabaseConnection,
}

impl WatchlistRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Get-or-create the profile's watch-list bundle. Idempotent.
    pub async fn ensure_list(&self, profile_id: i32) -> Result<watch_lists::Model> {
        if let Some(list) = self.find_list(profile_id).await? {
            return Ok(list);
        }

        WatchLists::insert(watch_lists::ActiveModel {
            profile_id: Set(profile_id),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::column(watch_lists::Column::ProfileId)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(&self.conn)
        .await?;

        self.find_list(profile_id)
            .await?
            .context("watch list missing after insert")
    }

    async fn find_list(&self, profile_id: i32) -> Result<Option<watch_lists::Model>> {
        let list = WatchLists::find()
            .filter(watch_lists::Column::ProfileId.eq(profile_id))
            .one(&self.conn)
            .await?;
        Ok(list)
    }

    /// Move the (profile, anime) pair into `category`, or out of it when it
    /// is already there.
    ///
    /// Runs as one transaction: clearing the other three categories and
    /// toggling the requested one either both land or neither does, so the
    /// one-category-per-pair invariant holds under concurrent requests.
    /// Returns the category the pair ends up in (`None` after a toggle-off).
    pub async fn set_category(
        &self,
        watch_list_id: i32,
        profile_id: i32,
        anime_id: i32,
        category: WatchCategory,
    ) -> Result<Option<WatchCategory>> {
        let txn = self.conn.begin().await?;

        // Absent rows here are the normal case, not an error.
        WatchListEntries::delete_many()
            .filter(watch_list_entries::Column::ProfileId.eq(profile_id))
            .filter(watch_list_entries::Column::AnimeId.eq(anime_id))
            .filter(watch_list_entries::Column::Category.ne(category.as_str()))
            .exec(&txn)
            .await?;

        let existing = WatchListEntries::find()
            .filter(watch_list_entries::Column::ProfileId.eq(profile_id))
            .filter(watch_list_entries::Column::AnimeId.eq(anime_id))
            .filter(watch_list_entries::Column::Category.eq(category.as_str()))
            .one(&txn)
            .await?;

        let state = if let Some(entry) = existing {
            entry.delete(&txn).await?;
            None
        } else {
            watch_list_entries::ActiveModel {
                watch_list_id: Set(watch_list_id),
                profile_id: Set(profile_id),
                anime_id: Set(anime_id),
                category: Set(category.as_str().to_owned()),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            Some(category)
        };

        txn.commit().await?;

        debug!(
            profile_id,
            anime_id,
            state = state.map_or("none", WatchCategory::as_str),
            "watch list category set"
        );
        Ok(state)
    }

    /// Flip the favorite marker for the pair. Returns whether the anime is a
    /// favorite after the call. Never touches the four exclusive categories.
    pub async fn toggle_favorite(
        &self,
        watch_list_id: i32,
        profile_id: i32,
        anime_id: i32,
    ) -> Result<bool> {
        let txn = self.conn.begin().await?;

        let existing = Favorites::find()
            .filter(favorites::Column::ProfileId.eq(profile_id))
            .filter(favorites::Column::AnimeId.eq(anime_id))
            .one(&txn)
            .await?;

        let now_favorite = if let Some(entry) = existing {
            entry.delete(&txn).await?;
            false
        } else {
            favorites::ActiveModel {
                watch_list_id: Set(watch_list_id),
                profile_id: Set(profile_id),
                anime_id: Set(anime_id),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            true
        };

        txn.commit().await?;
        Ok(now_favorite)
    }

    pub async fn current_category(
        &self,
        profile_id: i32,
        anime_id: i32,
    ) -> Result<Option<WatchCategory>> {
        let entry = WatchListEntries::find()
            .filter(watch_list_entries::Column::ProfileId.eq(profile_id))
            .filter(watch_list_entries::Column::AnimeId.eq(anime_id))
            .one(&self.conn)
            .await?;

        entry
            .map(|e| {
                e.category
                    .parse::<WatchCategory>()
                    .map_err(|e| anyhow::anyhow!(e))
            })
            .transpose()
    }

    pub async fn is_favorite(&self, profile_id: i32, anime_id: i32) -> Result<bool> {
        let entry = Favorites::find()
            .filter(favorites::Column::ProfileId.eq(profile_id))
            .filter(favorites::Column::AnimeId.eq(anime_id))
            .one(&self.conn)
            .await?;
        Ok(entry.is_some())
    }

    /// Anime in one category of a profile's list, most recently added first.
    pub async fn list_category(
        &self,
        profile_id: i32,
        category: WatchCategory,
    ) -> Result<Vec<anime::Model>> {
        let rows = WatchListEntries::find()
            .filter(watch_list_entries::Column::ProfileId.eq(profile_id))
            .filter(watch_list_entries::Column::Category.eq(category.as_str()))
            .order_by_desc(watch_list_entries::Column::Id)
            .find_also_related(Anime)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().filter_map(|(_, anime)| anime).collect())
    }

    pub async fn list_favorites(&self, profile_id: i32) -> Result<Vec<anime::Model>> {
        let rows = Favorites::find()
            .filter(favorites::Column::ProfileId.eq(profile_id))
            .order_by_desc(favorites::Column::Id)
            .find_also_related(Anime)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().filter_map(|(_, anime)| anime).collect())
    }
}
