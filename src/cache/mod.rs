//! Cache
//!
//! Cache opcional en Redis para las estadísticas.

pub mod cache_config;
pub mod redis_client;
pub mod stats_cache;

pub use cache_config::CacheConfig;
pub use redis_client::RedisClient;
pub use stats_cache::StatsCache;
