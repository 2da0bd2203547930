pub mod catalog_service;
pub mod catalog_service_impl;
pub use catalog_service::{CatalogError, CatalogService};
pub use catalog_service_impl::SeaOrmCatalogService;

pub mod watchlist_service;
pub mod watchlist_service_impl;
pub use watchlist_service::{WatchlistError, WatchlistService};
pub use watchlist_service_impl::SeaOrmWatchlistService;

pub mod community_service;
pub mod community_service_impl;
pub use community_service::{CommunityError, CommunityService};
pub use community_service_impl::SeaOrmCommunityService;

pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService, LoginResult, UserInfo};
pub use auth_service_impl::SeaOrmAuthService;

pub mod profile_service;
pub mod profile_service_impl;
pub use profile_service::{ProfileError, ProfileService};
pub use profile_service_impl::SeaOrmProfileService;
