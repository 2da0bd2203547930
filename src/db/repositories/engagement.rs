use crate::entities::{anime, anime_views, comments, prelude::*, visitor_ips};
use anyhow::{Context, Result};
use rand::Rng;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbBackend, EntityTrait, FromQueryResult, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, Statement,
};
use std::collections::{HashMap, HashSet};

/// View-count-first ordering with comment count and recency as tie-breaks.
/// Trailing id keeps the order total and stable.
const TRENDING_SQL: &str = "\
SELECT a.* FROM anime AS a \
ORDER BY (SELECT COUNT(*) FROM anime_views AS v WHERE v.anime_id = a.id) DESC, \
(SELECT COUNT(*) FROM comments AS c WHERE c.anime_id = a.id) DESC, \
a.release_date DESC, a.id ASC \
LIMIT ? OFFSET ?";

/// Same as trending minus the recency factor.
const POPULAR_SQL: &str = "\
SELECT a.* FROM anime AS a \
ORDER BY (SELECT COUNT(*) FROM anime_views AS v WHERE v.anime_id = a.id) DESC, \
(SELECT COUNT(*) FROM comments AS c WHERE c.anime_id = a.id) DESC, \
a.id ASC \
LIMIT ? OFFSET ?";

#[derive(FromQueryResult)]
struct AvgStar {
    avg: Option<f64>,
}

pub struct EngagementRepository {
    conn: DatabaseConnection,
}

impl EngagementRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Count one view for `ip` on the anime. Get-or-create on the visitor IP
    /// plus insert-ignore on the (anime, ip) pair makes this idempotent, so
    /// concurrent duplicate calls are safe.
    pub async fn record_view(&self, anime_id: i32, ip: &str) -> Result<()> {
        let ip_row = match self.find_ip(ip).await? {
            Some(row) => row,
            None => {
                VisitorIps::insert(visitor_ips::ActiveModel {
                    ip: Set(ip.to_owned()),
                    ..Default::default()
                })
                .on_conflict(
                    OnConflict::column(visitor_ips::Column::Ip)
                        .do_nothing()
                        .to_owned(),
                )
                .exec_without_returning(&self.conn)
                .await?;

                self.find_ip(ip)
                    .await?
                    .context("visitor ip missing after insert")?
            }
        };

        AnimeViews::insert(anime_views::ActiveModel {
            anime_id: Set(anime_id),
            ip_id: Set(ip_row.id),
        })
        .on_conflict(
            OnConflict::columns([anime_views::Column::AnimeId, anime_views::Column::IpId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(&self.conn)
        .await?;

        Ok(())
    }

    async fn find_ip(&self, ip: &str) -> Result<Option<visitor_ips::Model>> {
        let row = VisitorIps::find()
            .filter(visitor_ips::Column::Ip.eq(ip))
            .one(&self.conn)
            .await?;
        Ok(row)
    }

    pub async fn view_count(&self, anime_id: i32) -> Result<u64> {
        let count = AnimeViews::find()
            .filter(anime_views::Column::AnimeId.eq(anime_id))
            .count(&self.conn)
            .await?;
        Ok(count)
    }

    pub async fn comment_count(&self, anime_id: i32) -> Result<u64> {
        let count = Comments::find()
            .filter(comments::Column::AnimeId.eq(anime_id))
            .count(&self.conn)
            .await?;
        Ok(count)
    }

    pub async fn trending(&self, page: u64, per_page: u64) -> Result<Vec<anime::Model>> {
        self.ranked(TRENDING_SQL, page, per_page).await
    }

    pub async fn popular(&self, page: u64, per_page: u64) -> Result<Vec<anime::Model>> {
        self.ranked(POPULAR_SQL, page, per_page).await
    }

    async fn ranked(&self, sql: &str, page: u64, per_page: u64) -> Result<Vec<anime::Model>> {
        let offset = page.saturating_mul(per_page);
        let rows = Anime::find()
            .from_raw_sql(Statement::from_sql_and_values(
                DbBackend::Sqlite,
                sql,
                [per_page.into(), offset.into()],
            ))
            .all(&self.conn)
            .await?;
        Ok(rows)
    }

    pub async fn recent(&self, page: u64, per_page: u64) -> Result<Vec<anime::Model>> {
        let rows = Anime::find()
            .order_by_desc(anime::Column::ReleaseDate)
            .order_by_asc(anime::Column::Id)
            .offset(page.saturating_mul(per_page))
            .limit(per_page)
            .all(&self.conn)
            .await?;
        Ok(rows)
    }

    /// Up to `n` distinct anime from the most recent comments, ordered by
    /// each anime's newest comment. One newest-first scan, first seen wins.
    pub async fn latest_commented(&self, n: usize) -> Result<Vec<anime::Model>> {
        let commented: Vec<i32> = Comments::find()
            .select_only()
            .column(comments::Column::AnimeId)
            .order_by_desc(comments::Column::CreatedAt)
            .order_by_desc(comments::Column::Id)
            .into_tuple()
            .all(&self.conn)
            .await?;

        let mut seen = HashSet::new();
        let mut ids = Vec::new();
        for anime_id in commented {
            if seen.insert(anime_id) {
                ids.push(anime_id);
                if ids.len() == n {
                    break;
                }
            }
        }

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut by_id: HashMap<i32, anime::Model> = Anime::find()
            .filter(anime::Column::Id.is_in(ids.clone()))
            .all(&self.conn)
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect();

        Ok(ids.into_iter().filter_map(|id| by_id.remove(&id)).collect())
    }

    /// Arithmetic mean of the anime's stars; `None` when nothing is rated.
    pub async fn average_rating(&self, anime_id: i32) -> Result<Option<f64>> {
        let row = AvgStar::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Sqlite,
            "SELECT AVG(star) AS avg FROM ratings WHERE anime_id = ?",
            [anime_id.into()],
        ))
        .one(&self.conn)
        .await?;

        Ok(row.and_then(|r| r.avg))
    }

    /// One title picked uniformly from the catalog, `None` when it is empty.
    /// Selects by row offset so gaps in the id space cannot stall the pick.
    pub async fn recommend_random(&self) -> Result<Option<anime::Model>> {
        let total = Anime::find().count(&self.conn).await?;
        if total == 0 {
            return Ok(None);
        }

        let offset = rand::rng().random_range(0..total);
        let pick = Anime::find()
            .order_by_asc(anime::Column::Id)
            .offset(offset)
            .limit(1)
            .one(&self.conn)
            .await?;
        Ok(pick)
    }
}
