use crate::entities::{
    anime, anime_directors, anime_genres, directors, genres, prelude::*, studios,
};
use crate::models::anime::{NewAnime, slugify};
use anyhow::{Context, Result};
use sea_orm::sea_query::Query as SeaQuery;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbBackend, EntityTrait,
    FromQueryResult, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, Set, Statement,
    TransactionTrait,
};
use serde::Deserialize;
use tracing::info;

/// Multi-value catalog filter; facets are ANDed, values within a facet ORed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogFilter {
    /// Substring match over title and second title.
    pub q: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub directors: Vec<String>,
    #[serde(default)]
    pub studios: Vec<String>,
    #[serde(default)]
    pub years: Vec<String>,
    #[serde(default)]
    pub statuses: Vec<String>,
    #[serde(default)]
    pub age_ratings: Vec<String>,
    #[serde(default)]
    pub seasons: Vec<String>,
    #[serde(default)]
    pub kinds: Vec<String>,
}

#[derive(FromQueryResult)]
struct YearRow {
    year: String,
}

pub struct AnimeRepository {
    conn: DatabaseConnection,
}

impl AnimeRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Insert a title with its studio, genre and director links, creating the
    /// referenced rows by slug where they do not exist yet.
    pub async fn add(&self, new: &NewAnime) -> Result<anime::Model> {
        let txn = self.conn.begin().await?;

        let studio = match Studios::find()
            .filter(studios::Column::Slug.eq(slugify(&new.studio)))
            .one(&txn)
            .await?
        {
            Some(studio) => studio,
            None => {
                studios::ActiveModel {
                    name: Set(new.studio.clone()),
                    slug: Set(slugify(&new.studio)),
                    ..Default::default()
                }
                .insert(&txn)
                .await?
            }
        };

        let model = anime::ActiveModel {
            title: Set(new.title.clone()),
            second_title: Set(new.second_title.clone()),
            slug: Set(new.slug.clone()),
            description: Set(new.description.clone()),
            poster: Set(new.poster.clone()),
            studio_id: Set(studio.id),
            release_date: Set(new.release_date.clone()),
            episode_count: Set(new.episode_count),
            status: Set(new.status.as_str().to_owned()),
            age_rating: Set(new.age_rating.as_str().to_owned()),
            season: Set(new.season.as_str().to_owned()),
            kind: Set(new.kind.as_str().to_owned()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .with_context(|| format!("failed to insert anime '{}'", new.slug))?;

        for name in &new.genres {
            let genre = match Genres::find()
                .filter(genres::Column::Slug.eq(slugify(name)))
                .one(&txn)
                .await?
            {
                Some(genre) => genre,
                None => {
                    genres::ActiveModel {
                        name: Set(name.clone()),
                        slug: Set(slugify(name)),
                        ..Default::default()
                    }
                    .insert(&txn)
                    .await?
                }
            };
            anime_genres::ActiveModel {
                anime_id: Set(model.id),
                genre_id: Set(genre.id),
            }
            .insert(&txn)
            .await?;
        }

        for name in &new.directors {
            let director = match Directors::find()
                .filter(directors::Column::Slug.eq(slugify(name)))
                .one(&txn)
                .await?
            {
                Some(director) => director,
                None => {
                    directors::ActiveModel {
                        name: Set(name.clone()),
                        slug: Set(slugify(name)),
                        ..Default::default()
                    }
                    .insert(&txn)
                    .await?
                }
            };
            anime_directors::ActiveModel {
                anime_id: Set(model.id),
                director_id: Set(director.id),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;

        info!("Added anime: {} ({})", model.title, model.slug);
        Ok(model)
    }

    pub async fn get(&self, id: i32) -> Result<Option<anime::Model>> {
        let row = Anime::find_by_id(id).one(&self.conn).await?;
        Ok(row)
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<anime::Model>> {
        let row = Anime::find()
            .filter(anime::Column::Slug.eq(slug))
            .one(&self.conn)
            .await?;
        Ok(row)
    }

    pub async fn genres_of(&self, model: &anime::Model) -> Result<Vec<genres::Model>> {
        let rows = model.find_related(Genres).all(&self.conn).await?;
        Ok(rows)
    }

    pub async fn directors_of(&self, model: &anime::Model) -> Result<Vec<directors::Model>> {
        let rows = model.find_related(Directors).all(&self.conn).await?;
        Ok(rows)
    }

    pub async fn studio_of(&self, model: &anime::Model) -> Result<studios::Model> {
        model
            .find_related(Studios)
            .one(&self.conn)
            .await?
            .context("anime references a missing studio")
    }

    /// Titles sharing at least one genre with the given anime, itself
    /// excluded, deduplicated.
    pub async fn similar(&self, anime_id: i32, limit: u64) -> Result<Vec<anime::Model>> {
        let rows = Anime::find()
            .from_raw_sql(Statement::from_sql_and_values(
                DbBackend::Sqlite,
                "SELECT DISTINCT a.* FROM anime AS a \
                 JOIN anime_genres AS ag ON ag.anime_id = a.id \
                 WHERE ag.genre_id IN (SELECT genre_id FROM anime_genres WHERE anime_id = ?) \
                 AND a.id <> ? \
                 ORDER BY a.title ASC LIMIT ?",
                [anime_id.into(), anime_id.into(), limit.into()],
            ))
            .all(&self.conn)
            .await?;
        Ok(rows)
    }

    /// Filtered, paginated catalog browse ordered by title. Returns the page
    /// of rows and the total page count.
    pub async fn browse(
        &self,
        filter: &CatalogFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<anime::Model>, u64)> {
        let mut query = Anime::find();

        if let Some(q) = filter.q.as_deref().filter(|q| !q.is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(anime::Column::Title.contains(q))
                    .add(anime::Column::SecondTitle.contains(q)),
            );
        }

        if !filter.genres.is_empty() {
            let genre_ids: Vec<i32> = Genres::find()
                .filter(genres::Column::Slug.is_in(filter.genres.clone()))
                .all(&self.conn)
                .await?
                .into_iter()
                .map(|g| g.id)
                .collect();
            query = query.filter(
                anime::Column::Id.in_subquery(
                    SeaQuery::select()
                        .column(anime_genres::Column::AnimeId)
                        .from(AnimeGenres)
                        .and_where(anime_genres::Column::GenreId.is_in(genre_ids))
                        .to_owned(),
                ),
            );
        }

        if !filter.directors.is_empty() {
            let director_ids: Vec<i32> = Directors::find()
                .filter(directors::Column::Slug.is_in(filter.directors.clone()))
                .all(&self.conn)
                .await?
                .into_iter()
                .map(|d| d.id)
                .collect();
            query = query.filter(
                anime::Column::Id.in_subquery(
                    SeaQuery::select()
                        .column(anime_directors::Column::AnimeId)
                        .from(AnimeDirectors)
                        .and_where(anime_directors::Column::DirectorId.is_in(director_ids))
                        .to_owned(),
                ),
            );
        }

        if !filter.studios.is_empty() {
            let studio_ids: Vec<i32> = Studios::find()
                .filter(studios::Column::Slug.is_in(filter.studios.clone()))
                .all(&self.conn)
                .await?
                .into_iter()
                .map(|s| s.id)
                .collect();
            query = query.filter(anime::Column::StudioId.is_in(studio_ids));
        }

        if !filter.years.is_empty() {
            let mut years = Condition::any();
            for year in &filter.years {
                years = years.add(anime::Column::ReleaseDate.starts_with(year.as_str()));
            }
            query = query.filter(years);
        }

        if !filter.statuses.is_empty() {
            query = query.filter(anime::Column::Status.is_in(filter.statuses.clone()));
        }
        if !filter.age_ratings.is_empty() {
            query = query.filter(anime::Column::AgeRating.is_in(filter.age_ratings.clone()));
        }
        if !filter.seasons.is_empty() {
            query = query.filter(anime::Column::Season.is_in(filter.seasons.clone()));
        }
        if !filter.kinds.is_empty() {
            query = query.filter(anime::Column::Kind.is_in(filter.kinds.clone()));
        }

        let paginator = query
            .order_by_asc(anime::Column::Title)
            .paginate(&self.conn, per_page);
        let total_pages = paginator.num_pages().await?;
        let rows = paginator.fetch_page(page).await?;

        Ok((rows, total_pages))
    }

    pub async fn count(&self) -> Result<u64> {
        let total = Anime::find().count(&self.conn).await?;
        Ok(total)
    }

    pub async fn list_genres(&self) -> Result<Vec<genres::Model>> {
        let rows = Genres::find()
            .order_by_asc(genres::Column::Name)
            .all(&self.conn)
            .await?;
        Ok(rows)
    }

    pub async fn list_directors(&self) -> Result<Vec<directors::Model>> {
        let rows = Directors::find()
            .order_by_asc(directors::Column::Name)
            .all(&self.conn)
            .await?;
        Ok(rows)
    }

    pub async fn list_studios(&self) -> Result<Vec<studios::Model>> {
        let rows = Studios::find()
            .order_by_asc(studios::Column::Name)
            .all(&self.conn)
            .await?;
        Ok(rows)
    }

    pub async fn get_genre_by_slug(&self, slug: &str) -> Result<Option<genres::Model>> {
        let row = Genres::find()
            .filter(genres::Column::Slug.eq(slug))
            .one(&self.conn)
            .await?;
        Ok(row)
    }

    pub async fn get_director_by_slug(&self, slug: &str) -> Result<Option<directors::Model>> {
        let row = Directors::find()
            .filter(directors::Column::Slug.eq(slug))
            .one(&self.conn)
            .await?;
        Ok(row)
    }

    pub async fn get_studio_by_slug(&self, slug: &str) -> Result<Option<studios::Model>> {
        let row = Studios::find()
            .filter(studios::Column::Slug.eq(slug))
            .one(&self.conn)
            .await?;
        Ok(row)
    }

    /// Distinct release years present in the catalog, newest first.
    pub async fn release_years(&self) -> Result<Vec<String>> {
        let rows = YearRow::find_by_statement(Statement::from_string(
            DbBackend::Sqlite,
            "SELECT DISTINCT substr(release_date, 1, 4) AS year FROM anime ORDER BY year DESC"
                .to_owned(),
        ))
        .all(&self.conn)
        .await?;
        Ok(rows.into_iter().map(|r| r.year).collect())
    }
}
