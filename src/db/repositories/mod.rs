pub mod anime;
pub mod comment;
pub mod engagement;
pub mod profile;
pub mod rating;
pub mod user;
pub mod watchlist;
