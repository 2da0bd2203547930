use crate::entities::{prelude::*, profiles, watch_lists};
use anyhow::{Context, Result};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};

/// Partial update for a profile's public fields; `None` leaves a field alone.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub bio: Option<String>,
    pub birth_date: Option<String>,
    pub sex: Option<String>,
    pub avatar: Option<String>,
}

pub struct ProfileRepository {
    conn: DatabaseConnection,
}

impl ProfileRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Create-on-access: the first time an authenticated user is seen, the
    /// profile and its watch-list bundle come into existence. Idempotent.
    pub async fn ensure(&self, user_id: i32) -> Result<profiles::Model> {
        let profile = match self.find_by_user(user_id).await? {
            Some(profile) => profile,
            None => {
                Profiles::insert(profiles::ActiveModel {
                    user_id: Set(user_id),
                    ..Default::default()
                })
                .on_conflict(
                    OnConflict::column(profiles::Column::UserId)
                        .do_nothing()
                        .to_owned(),
                )
                .exec_without_returning(&self.conn)
                .await?;

                self.find_by_user(user_id)
                    .await?
                    .context("profile missing after insert")?
            }
        };

        WatchLists::insert(watch_lists::ActiveModel {
            profile_id: Set(profile.id),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::column(watch_lists::Column::ProfileId)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(&self.conn)
        .await?;

        Ok(profile)
    }

    pub async fn get(&self, id: i32) -> Result<Option<profiles::Model>> {
        let row = Profiles::find_by_id(id).one(&self.conn).await?;
        Ok(row)
    }

    pub async fn find_by_user(&self, user_id: i32) -> Result<Option<profiles::Model>> {
        let row = Profiles::find()
            .filter(profiles::Column::UserId.eq(user_id))
            .one(&self.conn)
            .await?;
        Ok(row)
    }

    pub async fn update(&self, id: i32, changes: ProfileChanges) -> Result<profiles::Model> {
        let profile = Profiles::find_by_id(id)
            .one(&self.conn)
            .await?
            .with_context(|| format!("profile {id} not found"))?;

        let mut active: profiles::ActiveModel = profile.into();
        if let Some(bio) = changes.bio {
            active.bio = Set(Some(bio));
        }
        if let Some(birth_date) = changes.birth_date {
            active.birth_date = Set(Some(birth_date));
        }
        if let Some(sex) = changes.sex {
            active.sex = Set(Some(sex));
        }
        if let Some(avatar) = changes.avatar {
            active.avatar = Set(Some(avatar));
        }

        let updated = active.update(&self.conn).await?;
        Ok(updated)
    }
}
