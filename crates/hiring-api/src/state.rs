//! Application state.

use hiring_store::{HiringStore, StoreResult};

use crate::config::ApiConfig;
use crate::services::AuthService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub store: HiringStore,
    pub auth: AuthService,
}

impl AppState {
    /// Create new application state, opening the configured store.
    pub async fn new(config: ApiConfig) -> StoreResult<Self> {
        let store = HiringStore::new(config.store.clone()).await?;
        Ok(Self::with_store(config, store))
    }

    pub fn with_store(config: ApiConfig, store: HiringStore) -> Self {
        let auth = AuthService::new(store.clone());
        Self {
            config,
            store,
            auth,
        }
    }
}
