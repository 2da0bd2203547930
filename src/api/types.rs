use serde::Serialize;

use crate::entities::{anime, directors, genres, studios};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Catalog card: everything a listing needs, nothing a detail page adds.
#[derive(Debug, Clone, Serialize)]
pub struct AnimeDto {
    pub id: i32,
    pub title: String,
    pub second_title: Option<String>,
    pub slug: String,
    pub description: String,
    pub poster: Option<String>,
    pub release_date: String,
    pub episode_count: i32,
    pub status: String,
    pub age_rating: String,
    pub season: String,
    pub kind: String,
}

impl From<anime::Model> for AnimeDto {
    fn from(model: anime::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            second_title: model.second_title,
            slug: model.slug,
            description: model.description,
            poster: model.poster,
            release_date: model.release_date,
            episode_count: model.episode_count,
            status: model.status,
            age_rating: model.age_rating,
            season: model.season,
            kind: model.kind,
        }
    }
}

/// A genre, director or studio as shown in facet lists and detail pages.
#[derive(Debug, Clone, Serialize)]
pub struct NamedDto {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

impl From<genres::Model> for NamedDto {
    fn from(model: genres::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            slug: model.slug,
        }
    }
}

impl From<directors::Model> for NamedDto {
    fn from(model: directors::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            slug: model.slug,
        }
    }
}

impl From<studios::Model> for NamedDto {
    fn from(model: studios::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            slug: model.slug,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AnimeDetailDto {
    #[serde(flatten)]
    pub anime: AnimeDto,
    pub genres: Vec<NamedDto>,
    pub directors: Vec<NamedDto>,
    pub studio: NamedDto,
    pub views: u64,
    pub comment_count: u64,
    pub average_rating: Option<f64>,
    pub similar: Vec<AnimeDto>,
    /// The viewer's own watch category, when authenticated.
    pub my_category: Option<String>,
    pub is_favorite: bool,
    pub my_rating: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct PageDto<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub total_pages: u64,
}

#[derive(Debug, Serialize)]
pub struct HomeDto {
    pub trending: Vec<AnimeDto>,
    pub popular: Vec<AnimeDto>,
    pub recent: Vec<AnimeDto>,
    pub latest_commented: Vec<AnimeDto>,
}

#[derive(Debug, Serialize)]
pub struct CatalogFacetsDto {
    pub genres: Vec<NamedDto>,
    pub directors: Vec<NamedDto>,
    pub studios: Vec<NamedDto>,
    pub years: Vec<String>,
    pub statuses: Vec<String>,
    pub age_ratings: Vec<String>,
    pub seasons: Vec<String>,
    pub kinds: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentDto {
    pub id: i32,
    pub author_id: i32,
    pub author_name: String,
    pub parent_id: Option<i32>,
    pub text: String,
    pub created_at: String,
}

/// The five shelves shown on a profile page.
#[derive(Debug, Serialize)]
pub struct WatchShelvesDto {
    pub watching: Vec<AnimeDto>,
    pub will_watch: Vec<AnimeDto>,
    pub viewed: Vec<AnimeDto>,
    pub dropped: Vec<AnimeDto>,
    pub favorites: Vec<AnimeDto>,
}

#[derive(Debug, Serialize)]
pub struct UserProfileDto {
    pub id: i32,
    pub user_id: i32,
    pub username: String,
    pub bio: Option<String>,
    pub birth_date: Option<String>,
    pub sex: Option<String>,
    pub avatar: Option<String>,
    pub shelves: WatchShelvesDto,
}
