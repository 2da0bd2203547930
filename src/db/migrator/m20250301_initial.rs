use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Default API key (regenerate after first login)
const DEFAULT_API_KEY: &str = "animeka_default_api_key_please_regenerate";

/// Hash the default password using Argon2id
fn hash_default_password() -> String {
    use argon2::{
        Argon2,
        password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
    };

    let password = b"password";
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password, &salt)
        .expect("Failed to hash default password")
        .to_string()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        manager
            .create_table(schema.create_table_from_entity(Users).if_not_exists().to_owned())
            .await?;
        manager
            .create_table(schema.create_table_from_entity(Profiles).if_not_exists().to_owned())
            .await?;
        manager
            .create_table(schema.create_table_from_entity(WatchLists).if_not_exists().to_owned())
            .await?;
        manager
            .create_table(schema.create_table_from_entity(Studios).if_not_exists().to_owned())
            .await?;
        manager
            .create_table(schema.create_table_from_entity(Genres).if_not_exists().to_owned())
            .await?;
        manager
            .create_table(schema.create_table_from_entity(Directors).if_not_exists().to_owned())
            .await?;
        manager
            .create_table(schema.create_table_from_entity(Anime).if_not_exists().to_owned())
            .await?;
        manager
            .create_table(schema.create_table_from_entity(AnimeGenres).if_not_exists().to_owned())
            .await?;
        manager
            .create_table(
                schema
                    .create_table_from_entity(AnimeDirectors)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .create_table(
                schema
                    .create_table_from_entity(WatchListEntries)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .create_table(schema.create_table_from_entity(Favorites).if_not_exists().to_owned())
            .await?;
        manager
            .create_table(schema.create_table_from_entity(Comments).if_not_exists().to_owned())
            .await?;
        manager
            .create_table(schema.create_table_from_entity(Ratings).if_not_exists().to_owned())
            .await?;
        manager
            .create_table(schema.create_table_from_entity(VisitorIps).if_not_exists().to_owned())
            .await?;
        manager
            .create_table(schema.create_table_from_entity(AnimeViews).if_not_exists().to_owned())
            .await?;

        // Composite uniques the entity derive cannot express:
        // one category row per (profile, anime), one favorite per pair,
        // one rating per pair.
        manager
            .create_index(
                Index::create()
                    .name("idx_watch_list_entries_pair")
                    .table(WatchListEntries)
                    .col(crate::entities::watch_list_entries::Column::ProfileId)
                    .col(crate::entities::watch_list_entries::Column::AnimeId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_favorites_pair")
                    .table(Favorites)
                    .col(crate::entities::favorites::Column::ProfileId)
                    .col(crate::entities::favorites::Column::AnimeId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_ratings_pair")
                    .table(Ratings)
                    .col(crate::entities::ratings::Column::ProfileId)
                    .col(crate::entities::ratings::Column::AnimeId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_comments_anime_created")
                    .table(Comments)
                    .col(crate::entities::comments::Column::AnimeId)
                    .col(crate::entities::comments::Column::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Seed default admin user with hashed password
        let now = chrono::Utc::now().to_rfc3339();
        let password_hash = hash_default_password();

        let insert = sea_orm_migration::sea_query::Query::insert()
            .into_table(Users)
            .columns([
                crate::entities::users::Column::Username,
                crate::entities::users::Column::PasswordHash,
                crate::entities::users::Column::ApiKey,
                crate::entities::users::Column::CreatedAt,
                crate::entities::users::Column::UpdatedAt,
            ])
            .values_panic([
                "admin".into(),
                password_hash.into(),
                DEFAULT_API_KEY.into(),
                now.clone().into(),
                now.into(),
            ])
            .to_owned();

        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for stmt in [
            Table::drop().table(AnimeViews).to_owned(),
            Table::drop().table(VisitorIps).to_owned(),
            Table::drop().table(Ratings).to_owned(),
            Table::drop().table(Comments).to_owned(),
            Table::drop().table(Favorites).to_owned(),
            Table::drop().table(WatchListEntries).to_owned(),
            Table::drop().table(AnimeDirectors).to_owned(),
            Table::drop().table(AnimeGenres).to_owned(),
            Table::drop().table(Anime).to_owned(),
            Table::drop().table(Directors).to_owned(),
            Table::drop().table(Genres).to_owned(),
            Table::drop().table(Studios).to_owned(),
            Table::drop().table(WatchLists).to_owned(),
            Table::drop().table(Profiles).to_owned(),
            Table::drop().table(Users).to_owned(),
        ] {
            manager.drop_table(stmt).await?;
        }

        Ok(())
    }
}
