//! Domain service for browsing the anime catalog.
//!
//! Handles filtered listings, title detail pages, the home page sections,
//! engagement rankings and the random recommendation.

use crate::api::types::{AnimeDetailDto, AnimeDto, CatalogFacetsDto, HomeDto, PageDto};
use crate::db::CatalogFilter;
use thiserror::Error;

/// Errors specific to catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Anime not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for CatalogError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for CatalogError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Domain service trait for the catalog.
#[async_trait::async_trait]
pub trait CatalogService: Send + Sync {
    /// Lists titles matching the filter, paginated.
    async fn browse(
        &self,
        filter: CatalogFilter,
        page: u64,
    ) -> Result<PageDto<AnimeDto>, CatalogError>;

    /// Full detail for one title.
    ///
    /// A `viewer_ip` registers a deduplicated view before counts are read;
    /// a `profile_id` fills in the viewer's own list state and rating.
    async fn detail(
        &self,
        slug: &str,
        viewer_ip: Option<&str>,
        profile_id: Option<i32>,
    ) -> Result<AnimeDetailDto, CatalogError>;

    /// Home page sections: trending, popular, recent and latest commented.
    async fn home(&self) -> Result<HomeDto, CatalogError>;

    /// Every distinct facet value present in the catalog.
    async fn facets(&self) -> Result<CatalogFacetsDto, CatalogError>;

    /// Titles ordered by view count, most viewed first.
    async fn trending(&self, page: u64) -> Result<Vec<AnimeDto>, CatalogError>;

    /// Titles ordered by comment count, most commented first.
    async fn popular(&self, page: u64) -> Result<Vec<AnimeDto>, CatalogError>;

    /// Titles ordered by release date, newest first.
    async fn recent(&self, page: u64) -> Result<Vec<AnimeDto>, CatalogError>;

    /// One uniformly random title, or `None` when the catalog is empty.
    async fn random(&self) -> Result<Option<AnimeDto>, CatalogError>;
}
