pub mod anime;
pub mod watchlist;
