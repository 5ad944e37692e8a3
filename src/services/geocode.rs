// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Reverse geocoding via Nominatim.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{AppError, Result};

/// Nominatim reverse-geocoding endpoint.
pub const NOMINATIM_REVERSE_URL: &str = "https://nominatim.openstreetmap.org/reverse";

/// Coordinates to structured address.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Address components (road, city, country, ...) for a point, or `None`
    /// if the service knows no address there.
    async fn reverse(&self, lat: f64, lon: f64) -> Result<Option<Value>>;
}

/// Nominatim client.
///
/// Nominatim rejects requests without a User-Agent; the shared client from
/// [`crate::services::http_client`] sets one.
#[derive(Clone)]
pub struct NominatimClient {
    http: reqwest::Client,
    url: String,
}

impl NominatimClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self::with_url(http, NOMINATIM_REVERSE_URL)
    }

    pub fn with_url(http: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    address: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn reverse(&self, lat: f64, lon: f64) -> Result<Option<Value>> {
        let response = self
            .http
            .get(&self.url)
            .query(&[
                ("format", "jsonv2".to_string()),
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Enrichment(format!("Geocoding request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Enrichment(format!(
                "Geocoding HTTP {}: {}",
                status, body
            )));
        }

        let body: ReverseResponse = response
            .json()
            .await
            .map_err(|e| AppError::Enrichment(format!("Geocoding JSON parse error: {}", e)))?;

        // Points in the ocean and the like come back as {"error": "Unable to geocode"}
        if let Some(error) = body.error {
            tracing::debug!(lat, lon, error = %error, "No address for location");
            return Ok(None);
        }

        Ok(body.address)
    }
}
