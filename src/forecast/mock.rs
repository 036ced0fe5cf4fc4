use super::openmeteo::{UpstreamFetchError, WeatherProvider};
use super::types::{WeatherPayload, WeatherQuery};
use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Stand-in provider that counts calls. A failing mock answers every call
/// with `UpstreamFetchError::ApiError`.
pub struct MockWeatherClient {
    calls: AtomicUsize,
    fail: bool,
}

impl MockWeatherClient {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: true,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The payload returned for a query. The call counter is folded in so
    /// that a refetch is distinguishable from a cached copy.
    pub fn hourly_for(query: &WeatherQuery, call: usize) -> WeatherPayload {
        Arc::new(json!({
            "time": [format!("{}T00:00", query.start), format!("{}T00:00", query.end)],
            "temperature_2m": [1.5, 2.5],
            "precipitation": [0.0, 0.3],
            "fetch": call,
        }))
    }
}

#[async_trait]
impl WeatherProvider for MockWeatherClient {
    async fn fetch_hourly(&self, query: &WeatherQuery) -> Result<WeatherPayload, UpstreamFetchError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail {
            return Err(UpstreamFetchError::ApiError(
                "HTTP 503 Service Unavailable: upstream down".to_string(),
            ));
        }
        Ok(Self::hourly_for(query, call))
    }
}
