//! Cache de estadísticas por filtro
//!
//! Las entradas se indexan por `TripFilter::cache_key` y se invalidan en
//! bloque ante cualquier escritura. Los fallos de Redis se registran y se
//! tratan como MISS.

use tracing::warn;

use super::redis_client::RedisClient;
use crate::models::stats::TripStats;
use crate::models::trip_filter::TripFilter;

const STATS_PREFIX: &str = "stats";

#[derive(Clone)]
pub struct StatsCache {
    client: RedisClient,
}

impl StatsCache {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    fn key(filter: &TripFilter) -> String {
        RedisClient::make_key(STATS_PREFIX, &filter.cache_key())
    }

    fn pattern() -> String {
        RedisClient::make_key(STATS_PREFIX, "*")
    }

    pub async fn get(&self, filter: &TripFilter) -> Option<TripStats> {
        match self.client.get_json(&Self::key(filter)).await {
            Ok(stats) => stats,
            Err(e) => {
                warn!("⚠️ Estadísticas cacheadas ilegibles: {}", e);
                None
            }
        }
    }

    pub async fn put(&self, filter: &TripFilter, stats: &TripStats) {
        let ttl = self.client.default_ttl();
        if let Err(e) = self.client.set_json(&Self::key(filter), stats, ttl).await {
            warn!("⚠️ No se pudieron cachear estadísticas: {}", e);
        }
    }

    pub async fn is_available(&self) -> bool {
        self.client.is_connected().await
    }

    pub async fn invalidate(&self) {
        if let Err(e) = self.client.delete_pattern(&Self::pattern()).await {
            warn!("⚠️ No se pudo invalidar el cache de estadísticas: {}", e);
        }
    }
}
