use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Serialize;
use std::sync::Arc;

use crate::{
    error::ApiError,
    forecast::{
        openmeteo::WeatherProvider,
        types::{WeatherParams, WeatherResponse},
        ResponseCache,
    },
};

// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<dyn ResponseCache>,
    pub weather_client: Arc<dyn WeatherProvider>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub message: String,
}

// Route handlers
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "Application is working fine!".to_string(),
    })
}

pub async fn get_weather(
    State(state): State<AppState>,
    params: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<WeatherResponse>, ApiError> {
    let Query(pairs) = params.map_err(|e| {
        tracing::debug!("Rejected query string: {}", e);
        ApiError::BadRequest
    })?;
    let query = WeatherParams::from_pairs(pairs).validate()?;
    let cache_key = query.cache_key();

    if let Some(data) = state.cache.get(&cache_key).await {
        tracing::info!("Cache hit for {}", cache_key);
        return Ok(Json(WeatherResponse::new(query, data)));
    }

    tracing::info!("Cache miss for {}", cache_key);

    match state.weather_client.fetch_hourly(&query).await {
        Ok(data) => {
            state.cache.set(cache_key, data.clone()).await;
            Ok(Json(WeatherResponse::new(query, data)))
        }
        Err(e) => {
            tracing::error!("Error fetching weather data: {}", e);
            Err(ApiError::ServerError)
        }
    }
}

// Create the router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/weather", get(get_weather))
        .with_state(state)
}
