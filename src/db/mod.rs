use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::entities::{anime, comments, directors, genres, profiles, studios, users, watch_lists};
use crate::models::anime::NewAnime;
use crate::models::watchlist::WatchCategory;

pub mod migrator;
pub mod repositories;

pub use repositories::anime::CatalogFilter;
pub use repositories::profile::ProfileChanges;
pub use repositories::user::User;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn anime_repo(&self) -> repositories::anime::AnimeRepository {
        repositories::anime::AnimeRepository::new(self.conn.clone())
    }

    fn engagement_repo(&self) -> repositories::engagement::EngagementRepository {
        repositories::engagement::EngagementRepository::new(self.conn.clone())
    }

    fn watchlist_repo(&self) -> repositories::watchlist::WatchlistRepository {
        repositories::watchlist::WatchlistRepository::new(self.conn.clone())
    }

    fn profile_repo(&self) -> repositories::profile::ProfileRepository {
        repositories::profile::ProfileRepository::new(self.conn.clone())
    }

    fn comment_repo(&self) -> repositories::comment::CommentRepository {
        repositories::comment::CommentRepository::new(self.conn.clone())
    }

    fn rating_repo(&self) -> repositories::rating::RatingRepository {
        repositories::rating::RatingRepository::new(self.conn.clone())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    // ---- catalog ----

    pub async fn add_anime(&self, new: &NewAnime) -> Result<anime::Model> {
        self.anime_repo().add(new).await
    }

    pub async fn get_anime(&self, id: i32) -> Result<Option<anime::Model>> {
        self.anime_repo().get(id).await
    }

    pub async fn get_anime_by_slug(&self, slug: &str) -> Result<Option<anime::Model>> {
        self.anime_repo().get_by_slug(slug).await
    }

    pub async fn browse_anime(
        &self,
        filter: &CatalogFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<anime::Model>, u64)> {
        self.anime_repo().browse(filter, page, per_page).await
    }

    pub async fn similar_anime(&self, anime_id: i32, limit: u64) -> Result<Vec<anime::Model>> {
        self.anime_repo().similar(anime_id, limit).await
    }

    pub async fn anime_genres(&self, model: &anime::Model) -> Result<Vec<genres::Model>> {
        self.anime_repo().genres_of(model).await
    }

    pub async fn anime_directors(&self, model: &anime::Model) -> Result<Vec<directors::Model>> {
        self.anime_repo().directors_of(model).await
    }

    pub async fn anime_studio(&self, model: &anime::Model) -> Result<studios::Model> {
        self.anime_repo().studio_of(model).await
    }

    pub async fn count_anime(&self) -> Result<u64> {
        self.anime_repo().count().await
    }

    pub async fn list_genres(&self) -> Result<Vec<genres::Model>> {
        self.anime_repo().list_genres().await
    }

    pub async fn list_directors(&self) -> Result<Vec<directors::Model>> {
        self.anime_repo().list_directors().await
    }

    pub async fn list_studios(&self) -> Result<Vec<studios::Model>> {
        self.anime_repo().list_studios().await
    }

    pub async fn get_genre_by_slug(&self, slug: &str) -> Result<Option<genres::Model>> {
        self.anime_repo().get_genre_by_slug(slug).await
    }

    pub async fn get_director_by_slug(&self, slug: &str) -> Result<Option<directors::Model>> {
        self.anime_repo().get_director_by_slug(slug).await
    }

    pub async fn get_studio_by_slug(&self, slug: &str) -> Result<Option<studios::Model>> {
        self.anime_repo().get_studio_by_slug(slug).await
    }

    pub async fn release_years(&self) -> Result<Vec<String>> {
        self.anime_repo().release_years().await
    }

    // ---- engagement ----

    pub async fn record_view(&self, anime_id: i32, ip: &str) -> Result<()> {
        self.engagement_repo().record_view(anime_id, ip).await
    }

    pub async fn view_count(&self, anime_id: i32) -> Result<u64> {
        self.engagement_repo().view_count(anime_id).await
    }

    pub async fn comment_count(&self, anime_id: i32) -> Result<u64> {
        self.engagement_repo().comment_count(anime_id).await
    }

    pub async fn trending_anime(&self, page: u64, per_page: u64) -> Result<Vec<anime::Model>> {
        self.engagement_repo().trending(page, per_page).await
    }

    pub async fn popular_anime(&self, page: u64, per_page: u64) -> Result<Vec<anime::Model>> {
        self.engagement_repo().popular(page, per_page).await
    }

    pub async fn recent_anime(&self, page: u64, per_page: u64) -> Result<Vec<anime::Model>> {
        self.engagement_repo().recent(page, per_page).await
    }

    pub async fn latest_commented_anime(&self, n: usize) -> Result<Vec<anime::Model>> {
        self.engagement_repo().latest_commented(n).await
    }

    pub async fn average_rating(&self, anime_id: i32) -> Result<Option<f64>> {
        self.engagement_repo().average_rating(anime_id).await
    }

    pub async fn recommend_random_anime(&self) -> Result<Option<anime::Model>> {
        self.engagement_repo().recommend_random().await
    }

    // ---- watch lists ----

    pub async fn ensure_watch_list(&self, profile_id: i32) -> Result<watch_lists::Model> {
        self.watchlist_repo().ensure_list(profile_id).await
    }

    pub async fn set_watch_category(
        &self,
        watch_list_id: i32,
        profile_id: i32,
        anime_id: i32,
        category: WatchCategory,
    ) -> Result<Option<WatchCategory>> {
        self.watchlist_repo()
            .set_category(watch_list_id, profile_id, anime_id, category)
            .await
    }

    pub async fn toggle_favorite(
        &self,
        watch_list_id: i32,
        profile_id: i32,
        anime_id: i32,
    ) -> Result<bool> {
        self.watchlist_repo()
            .toggle_favorite(watch_list_id, profile_id, anime_id)
            .await
    }

    pub async fn current_watch_category(
        &self,
        profile_id: i32,
        anime_id: i32,
    ) -> Result<Option<WatchCategory>> {
        self.watchlist_repo()
            .current_category(profile_id, anime_id)
            .await
    }

    pub async fn is_favorite(&self, profile_id: i32, anime_id: i32) -> Result<bool> {
        self.watchlist_repo().is_favorite(profile_id, anime_id).await
    }

    pub async fn list_watch_category(
        &self,
        profile_id: i32,
        category: WatchCategory,
    ) -> Result<Vec<anime::Model>> {
        self.watchlist_repo()
            .list_category(profile_id, category)
            .await
    }

    pub async fn list_favorites(&self, profile_id: i32) -> Result<Vec<anime::Model>> {
        self.watchlist_repo().list_favorites(profile_id).await
    }

    // ---- profiles ----

    pub async fn ensure_profile(&self, user_id: i32) -> Result<profiles::Model> {
        self.profile_repo().ensure(user_id).await
    }

    pub async fn get_profile(&self, id: i32) -> Result<Option<profiles::Model>> {
        self.profile_repo().get(id).await
    }

    pub async fn find_profile_by_user(&self, user_id: i32) -> Result<Option<profiles::Model>> {
        self.profile_repo().find_by_user(user_id).await
    }

    pub async fn update_profile(
        &self,
        id: i32,
        changes: ProfileChanges,
    ) -> Result<profiles::Model> {
        self.profile_repo().update(id, changes).await
    }

    // ---- comments & ratings ----

    pub async fn add_comment(
        &self,
        author_id: i32,
        anime_id: i32,
        parent_id: Option<i32>,
        text: &str,
    ) -> Result<comments::Model> {
        self.comment_repo()
            .add(author_id, anime_id, parent_id, text)
            .await
    }

    pub async fn get_comment(&self, id: i32) -> Result<Option<comments::Model>> {
        self.comment_repo().get(id).await
    }

    pub async fn delete_comment(&self, comment: comments::Model) -> Result<()> {
        self.comment_repo().delete(comment).await
    }

    pub async fn list_comments(
        &self,
        anime_id: i32,
    ) -> Result<Vec<(comments::Model, Option<users::Model>)>> {
        self.comment_repo().list_for_anime(anime_id).await
    }

    pub async fn rate_anime(&self, profile_id: i32, anime_id: i32, star: i32) -> Result<()> {
        self.rating_repo().upsert(profile_id, anime_id, star).await
    }

    pub async fn get_rating(
        &self,
        profile_id: i32,
        anime_id: i32,
    ) -> Result<Option<crate::entities::ratings::Model>> {
        self.rating_repo().get(profile_id, anime_id).await
    }

    // ---- users ----

    pub async fn register_user(&self, username: &str, password: &str) -> Result<User> {
        self.user_repo().create(username, password).await
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn get_user_by_id(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn verify_user_password(&self, username: &str, password: &str) -> Result<bool> {
        self.user_repo().verify_password(username, password).await
    }

    pub async fn verify_api_key(&self, api_key: &str) -> Result<Option<User>> {
        self.user_repo().verify_api_key(api_key).await
    }

    pub async fn get_user_api_key(&self, username: &str) -> Result<Option<String>> {
        self.user_repo().get_api_key(username).await
    }
}
