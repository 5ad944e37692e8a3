// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Historical weather lookups (OpenWeather One Call "timemachine").

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{AppError, Result};

/// OpenWeather historical endpoint.
pub const TIMEMACHINE_URL: &str = "https://api.openweathermap.org/data/2.5/onecall/timemachine";

/// Weather at a point in time and space.
#[async_trait]
pub trait WeatherApi: Send + Sync {
    /// Weather record at unix time `dt`, or `None` when the service has no
    /// `current` entry for it.
    async fn weather_at(&self, dt: i64, lat: f64, lon: f64) -> Result<Option<Value>>;
}

/// OpenWeather client. Holds the user's API key.
#[derive(Clone)]
pub struct OpenWeatherClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(http: reqwest::Client, api_key: String) -> Self {
        Self::with_url(http, TIMEMACHINE_URL, api_key)
    }

    pub fn with_url(http: reqwest::Client, url: impl Into<String>, api_key: String) -> Self {
        Self {
            http,
            url: url.into(),
            api_key,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TimemachineResponse {
    #[serde(default)]
    current: Option<Value>,
}

#[async_trait]
impl WeatherApi for OpenWeatherClient {
    async fn weather_at(&self, dt: i64, lat: f64, lon: f64) -> Result<Option<Value>> {
        let response = self
            .http
            .get(&self.url)
            .query(&[
                ("dt", dt.to_string()),
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("appid", self.api_key.clone()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Enrichment(format!("Weather request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Enrichment(format!(
                "Weather HTTP {}: {}",
                status, body
            )));
        }

        let body: TimemachineResponse = response
            .json()
            .await
            .map_err(|e| AppError::Enrichment(format!("Weather JSON parse error: {}", e)))?;

        Ok(body.current.filter(|v| !v.is_null()))
    }
}
