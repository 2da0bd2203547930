use crate::entities::{comments, prelude::*, users};
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};

pub struct CommentRepository {
    conn: DatabaseConnection,
}

impl CommentRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn add(
        &self,
        author_id: i32,
        anime_id: i32,
        parent_id: Option<i32>,
        text: &str,
    ) -> Result<comments::Model> {
        let created = comments::ActiveModel {
            author_id: Set(author_id),
            anime_id: Set(anime_id),
            parent_id: Set(parent_id),
            text: Set(text.to_owned()),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?;
        Ok(created)
    }

    pub async fn get(&self, id: i32) -> Result<Option<comments::Model>> {
        let row = Comments::find_by_id(id).one(&self.conn).await?;
        Ok(row)
    }

    pub async fn delete(&self, comment: comments::Model) -> Result<()> {
        comment.delete(&self.conn).await?;
        Ok(())
    }

    /// Comments on an anime with their authors, newest first.
    pub async fn list_for_anime(
        &self,
        anime_id: i32,
    ) -> Result<Vec<(comments::Model, Option<users::Model>)>> {
        let rows = Comments::find()
            .filter(comments::Column::AnimeId.eq(anime_id))
            .order_by_desc(comments::Column::CreatedAt)
            .order_by_desc(comments::Column::Id)
            .find_also_related(Users)
            .all(&self.conn)
            .await?;
        Ok(rows)
    }
}
