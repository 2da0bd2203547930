//! `SeaORM` implementation of the `CommunityService` trait.

use crate::api::types::CommentDto;
use crate::db::Store;
use crate::entities::anime;
use crate::services::community_service::{COMMENT_MAX_LEN, CommunityError, CommunityService};
use async_trait::async_trait;
use tracing::info;

pub struct SeaOrmCommunityService {
    store: Store,
}

impl SeaOrmCommunityService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    async fn get_anime(&self, slug: &str) -> Result<anime::Model, CommunityError> {
        self.store
            .get_anime_by_slug(slug)
            .await?
            .ok_or_else(|| CommunityError::AnimeNotFound(slug.to_string()))
    }
}

#[async_trait]
impl CommunityService for SeaOrmCommunityService {
    async fn add_comment(
        &self,
        user_id: i32,
        slug: &str,
        parent_id: Option<i32>,
        text: &str,
    ) -> Result<CommentDto, CommunityError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(CommunityError::Validation(
                "Comment text must not be empty".to_string(),
            ));
        }
        if text.chars().count() > COMMENT_MAX_LEN {
            return Err(CommunityError::Validation(format!(
                "Comment text must not exceed {COMMENT_MAX_LEN} characters"
            )));
        }

        let anime = self.get_anime(slug).await?;

        // A reply must point at a comment on the same title.
        if let Some(pid) = parent_id {
            let parent = self
                .store
                .get_comment(pid)
                .await?
                .ok_or(CommunityError::CommentNotFound(pid))?;
            if parent.anime_id != anime.id {
                return Err(CommunityError::Validation(
                    "Parent comment belongs to a different anime".to_string(),
                ));
            }
        }

        let author = self
            .store
            .get_user_by_id(user_id)
            .await?
            .ok_or_else(|| CommunityError::Internal("Author no longer exists".to_string()))?;

        let created = self
            .store
            .add_comment(user_id, anime.id, parent_id, text)
            .await?;

        info!(user = user_id, anime = %slug, comment = created.id, "Comment posted");

        Ok(CommentDto {
            id: created.id,
            author_id: created.author_id,
            author_name: author.username,
            parent_id: created.parent_id,
            text: created.text,
            created_at: created.created_at,
        })
    }

    async fn delete_comment(&self, user_id: i32, comment_id: i32) -> Result<(), CommunityError> {
        let comment = self
            .store
            .get_comment(comment_id)
            .await?
            .ok_or(CommunityError::CommentNotFound(comment_id))?;

        if comment.author_id != user_id {
            return Err(CommunityError::PermissionDenied(
                "Only the author can delete a comment".to_string(),
            ));
        }

        self.store.delete_comment(comment).await?;

        info!(user = user_id, comment = comment_id, "Comment deleted");

        Ok(())
    }

    async fn list_comments(&self, slug: &str) -> Result<Vec<CommentDto>, CommunityError> {
        let anime = self.get_anime(slug).await?;

        let rows = self.store.list_comments(anime.id).await?;

        Ok(rows
            .into_iter()
            .map(|(comment, author)| CommentDto {
                id: comment.id,
                author_id: comment.author_id,
                author_name: author.map_or_else(String::new, |u| u.username),
                parent_id: comment.parent_id,
                text: comment.text,
                created_at: comment.created_at,
            })
            .collect())
    }

    async fn rate(&self, user_id: i32, slug: &str, star: i32) -> Result<(), CommunityError> {
        if !(1..=10).contains(&star) {
            return Err(CommunityError::Validation(
                "Star rating must be between 1 and 10".to_string(),
            ));
        }

        let anime = self.get_anime(slug).await?;
        let profile = self.store.ensure_profile(user_id).await?;

        self.store.rate_anime(profile.id, anime.id, star).await?;

        info!(user = user_id, anime = %slug, star, "Rating stored");

        Ok(())
    }
}
