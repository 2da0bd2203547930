pub mod prelude;

pub mod anime;
pub mod anime_directors;
pub mod anime_genres;
pub mod anime_views;
pub mod comments;
pub mod directors;
pub mod favorites;
pub mod genres;
pub mod profiles;
pub mod ratings;
pub mod studios;
pub mod users;
pub mod visitor_ips;
pub mod watch_list_entries;
pub mod watch_lists;
