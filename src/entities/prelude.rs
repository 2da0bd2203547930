pub use super::anime::Entity as Anime;
pub use super::anime_directors::Entity as AnimeDirectors;
pub use super::anime_genres::Entity as AnimeGenres;
pub use super::anime_views::Entity as AnimeViews;
pub use super::comments::Entity as Comments;
pub use super::directors::Entity as Directors;
pub use super::favorites::Entity as Favorites;
pub use super::genres::Entity as Genres;
pub use super::profiles::Entity as Profiles;
pub use super::ratings::Entity as Ratings;
pub use super::studios::Entity as Studios;
pub use super::users::Entity as Users;
pub use super::visitor_ips::Entity as VisitorIps;
pub use super::watch_list_entries::Entity as WatchListEntries;
pub use super::watch_lists::Entity as WatchLists;
