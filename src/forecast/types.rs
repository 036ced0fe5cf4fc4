use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::error::ApiError;

/// The upstream `hourly` object, passed through untouched.
pub type WeatherPayload = Arc<Value>;

/// Raw `/weather` query string. Presence is checked in `validate`.
#[derive(Debug, Default)]
pub struct WeatherParams {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

/// A query with all four parameters present. Values are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherQuery {
    pub latitude: String,
    pub longitude: String,
    pub start: String,
    pub end: String,
}

impl WeatherParams {
    /// Picks the four known parameters out of the decoded query pairs. When a
    /// parameter repeats, the first occurrence wins; unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "latitude" => &mut params.latitude,
                "longitude" => &mut params.longitude,
                "start" => &mut params.start,
                "end" => &mut params.end,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }

    /// Empty strings count as missing.
    pub fn validate(self) -> Result<WeatherQuery, ApiError> {
        fn present(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.is_empty())
        }

        match (
            present(self.latitude),
            present(self.longitude),
            present(self.start),
            present(self.end),
        ) {
            (Some(latitude), Some(longitude), Some(start), Some(end)) => Ok(WeatherQuery {
                latitude,
                longitude,
                start,
                end,
            }),
            _ => Err(ApiError::BadRequest),
        }
    }
}

impl WeatherQuery {
    pub fn cache_key(&self) -> String {
        format!(
            "weather-{}-{}-{}-{}",
            self.latitude, self.longitude, self.start, self.end
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WeatherResponse {
    pub latitude: String,
    pub longitude: String,
    pub start: String,
    pub end: String,
    pub data: WeatherPayload,
}

impl WeatherResponse {
    pub fn new(query: WeatherQuery, data: WeatherPayload) -> Self {
        Self {
            latitude: query.latitude,
            longitude: query.longitude,
            start: query.start,
            end: query.end,
            data,
        }
    }
}
