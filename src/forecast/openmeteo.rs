use super::types::{WeatherPayload, WeatherQuery};
use crate::config::Config;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Any failure talking to the weather provider. The variants only shape the
/// log line; callers treat them all the same.
#[derive(Error, Debug)]
pub enum UpstreamFetchError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("API error: {0}")]
    ApiError(String),
    #[error("response has no hourly data")]
    MissingHourly,
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetches the hourly series for the query and returns the provider's
    /// `hourly` object as-is.
    async fn fetch_hourly(&self, query: &WeatherQuery) -> Result<WeatherPayload, UpstreamFetchError>;
}

pub struct OpenMeteoClient {
    client: Client,
    base_url: String,
    hourly_variables: String,
}

impl OpenMeteoClient {
    pub fn new(config: &Config) -> Result<Self, UpstreamFetchError> {
        let mut builder = Client::builder().user_agent("WeatherCacheProxy/1.0");
        if let Some(timeout) = config.upstream_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.weather_api_url.clone(),
            hourly_variables: config.weather_hourly_variables.clone(),
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoClient {
    async fn fetch_hourly(&self, query: &WeatherQuery) -> Result<WeatherPayload, UpstreamFetchError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", query.latitude.as_str()),
                ("longitude", query.longitude.as_str()),
                ("start_date", query.start.as_str()),
                ("end_date", query.end.as_str()),
                ("hourly", self.hourly_variables.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(UpstreamFetchError::ApiError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body: Value = response.json().await?;
        extract_hourly(body)
    }
}

fn extract_hourly(mut body: Value) -> Result<WeatherPayload, UpstreamFetchError> {
    match body.get_mut("hourly").map(Value::take) {
        Some(hourly) if !hourly.is_null() => Ok(Arc::new(hourly)),
        _ => Err(UpstreamFetchError::MissingHourly),
    }
}
