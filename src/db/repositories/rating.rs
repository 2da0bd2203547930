use crate::entities::{prelude::*, ratings};
use anyhow::Result;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

pub struct RatingRepository {
    conn: DatabaseConnection,
}

impl RatingRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Upsert by (profile, anime): re-rating overwrites the star value.
    pub async fn upsert(&self, profile_id: i32, anime_id: i32, star: i32) -> Result<()> {
        Ratings::insert(ratings::ActiveModel {
            profile_id: Set(profile_id),
            anime_id: Set(anime_id),
            star: Set(star),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::columns([ratings::Column::ProfileId, ratings::Column::AnimeId])
                .update_column(ratings::Column::Star)
                .to_owned(),
        )
        .exec_without_returning(&self.conn)
        .await?;
        Ok(())
    }

    pub async fn get(&self, profile_id: i32, anime_id: i32) -> Result<Option<ratings::Model>> {
        let row = Ratings::find()
            .filter(ratings::Column::ProfileId.eq(profile_id))
            .filter(ratings::Column::AnimeId.eq(anime_id))
            .one(&self.conn)
            .await?;
        Ok(row)
    }
}
