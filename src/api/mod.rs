use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::Config;
use crate::state::SharedState;

mod anime;
pub mod auth;
mod catalog;
mod community;
mod error;
mod observability;
mod profiles;
pub mod types;
mod watchlist;

pub use error::ApiError;
pub use types::*;

use metrics_exporter_prometheus::PrometheusHandle;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Arc<RwLock<Config>> {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }
}

pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub async fn router(state: Arc<AppState>) -> Router {
    let (cors_origins, secure_cookies) = {
        let config = state.config().read().await;
        (
            config.server.cors_allowed_origins.clone(),
            config.server.secure_cookies,
        )
    };

    let protected_routes = create_protected_router(state.clone());

    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(secure_cookies)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(60)));

    let api_router = Router::new()
        .merge(protected_routes)
        .route("/home", get(catalog::home))
        .route("/filters", get(catalog::filters))
        .route("/genres", get(catalog::list_genres))
        .route("/genres/{slug}", get(catalog::genre_detail))
        .route("/directors", get(catalog::list_directors))
        .route("/directors/{slug}", get(catalog::director_detail))
        .route("/studios", get(catalog::list_studios))
        .route("/studios/{slug}", get(catalog::studio_detail))
        .route("/anime", get(anime::list_anime))
        .route("/anime/trending", get(anime::trending))
        .route("/anime/popular", get(anime::popular))
        .route("/anime/recent", get(anime::recent))
        .route("/anime/random", get(anime::random))
        .route("/anime/{slug}", get(anime::get_anime))
        .route("/anime/{slug}/comments", get(community::list_comments))
        .route("/profiles/{id}", get(profiles::get_profile))
        .route("/profiles/{id}/list/{category}", get(profiles::get_shelf))
        .route("/profiles/{id}/favorites", get(profiles::get_favorites))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/metrics", get(observability::get_metrics))
        .layer(session_layer)
        .with_state(state);

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}

fn create_protected_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/me", get(auth::get_current_user))
        .route("/anime/{slug}/list", post(watchlist::set_category))
        .route("/anime/{slug}/favorite", post(watchlist::toggle_favorite))
        .route("/anime/{slug}/comments", post(community::add_comment))
        .route("/anime/{slug}/rating", post(community::rate))
        .route("/comments/{id}", delete(community::delete_comment))
        .route("/profiles/{id}", put(profiles::update_profile))
        .route_layer(middleware::from_fn_with_state(state, auth::auth_middleware))
}
