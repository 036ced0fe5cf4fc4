pub mod openmeteo;
#[cfg(test)]
pub mod mock;
pub mod types;

use async_trait::async_trait;
use moka::future::Cache;
use std::time::Duration;
use types::WeatherPayload;

/// Keyed store for upstream payloads. Lookups of unknown or expired keys
/// return `None`; neither operation can fail.
#[async_trait]
pub trait ResponseCache: Send + Sync {
    async fn get(&self, key: &str) -> Option<WeatherPayload>;
    async fn set(&self, key: String, payload: WeatherPayload);
}

/// In-process cache with one fixed TTL for every entry and no size bound.
pub struct MokaResponseCache {
    cache: Cache<String, WeatherPayload>,
}

impl MokaResponseCache {
    pub fn new(ttl: Duration) -> Self {
        let cache = Cache::builder().time_to_live(ttl).build();
        Self { cache }
    }
}

#[async_trait]
impl ResponseCache for MokaResponseCache {
    async fn get(&self, key: &str) -> Option<WeatherPayload> {
        self.cache.get(key).await
    }

    async fn set(&self, key: String, payload: WeatherPayload) {
        self.cache.insert(key, payload).await;
    }
}
