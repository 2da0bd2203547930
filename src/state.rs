use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AuthService, CatalogService, CommunityService, ProfileService, SeaOrmAuthService,
    SeaOrmCatalogService, SeaOrmCommunityService, SeaOrmProfileService, SeaOrmWatchlistService,
    WatchlistService,
};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub catalog_service: Arc<dyn CatalogService>,

    pub watchlist_service: Arc<dyn WatchlistService>,

    pub community_service: Arc<dyn CommunityService>,

    pub auth_service: Arc<dyn AuthService>,

    pub profile_service: Arc<dyn ProfileService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Ok(Self::with_store(config, store))
    }

    /// Wires the services around an already-connected store.
    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        let config_arc = Arc::new(RwLock::new(config));

        let catalog_service = Arc::new(SeaOrmCatalogService::new(
            store.clone(),
            config_arc.clone(),
        )) as Arc<dyn CatalogService>;

        let watchlist_service =
            Arc::new(SeaOrmWatchlistService::new(store.clone())) as Arc<dyn WatchlistService>;

        let community_service =
            Arc::new(SeaOrmCommunityService::new(store.clone())) as Arc<dyn CommunityService>;

        let auth_service = Arc::new(SeaOrmAuthService::new(store.clone())) as Arc<dyn AuthService>;

        let profile_service =
            Arc::new(SeaOrmProfileService::new(store.clone())) as Arc<dyn ProfileService>;

        Self {
            config: config_arc,
            store,
            catalog_service,
            watchlist_service,
            community_service,
            auth_service,
            profile_service,
        }
    }

    pub async fn config(&self) -> Config {
        self.config.read().await.clone()
    }
}
