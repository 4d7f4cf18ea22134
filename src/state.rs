//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::cache::StatsCache;
use crate::config::environment::EnvironmentConfig;
use crate::repositories::TripStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TripStore>,
    pub config: EnvironmentConfig,
    /// `None` cuando no hay Redis configurado
    pub stats_cache: Option<StatsCache>,
}

impl AppState {
    pub fn new(store: Arc<dyn TripStore>, config: EnvironmentConfig) -> Self {
        Self {
            store,
            config,
            stats_cache: None,
        }
    }

    pub fn with_stats_cache(mut self, cache: StatsCache) -> Self {
        self.stats_cache = Some(cache);
        self
    }
}
