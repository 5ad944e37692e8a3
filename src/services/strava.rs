// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava API client for listing, fetching and updating activities.
//!
//! Every call needs a non-expired access token; refreshing is the caller's
//! job. Failures are reported as [`AppError::Api`] and never retried.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::{Activity, ActivitySummary, ActivityUpdate};

/// Strava API base URL.
pub const STRAVA_API_URL: &str = "https://www.strava.com/api/v3";

/// Activities fetched per run. Only the first page is read.
pub const PAGE_SIZE: u32 = 30;

/// Activity endpoints used by the update pipeline.
#[async_trait]
pub trait ActivityApi: Send + Sync {
    /// Up to [`PAGE_SIZE`] activities that started after `after`, in the
    /// order Strava returns them.
    async fn list_since(&self, access_token: &str, after: i64) -> Result<Vec<ActivitySummary>>;

    /// Full record for one activity (summaries lack the description).
    async fn fetch_detail(&self, access_token: &str, activity_id: u64) -> Result<Activity>;

    /// Partial update; returns the activity as stored after the update.
    async fn update(
        &self,
        access_token: &str,
        activity_id: u64,
        update: &ActivityUpdate,
    ) -> Result<Activity>;
}

/// Strava API client.
#[derive(Clone)]
pub struct StravaClient {
    http: reqwest::Client,
    base_url: String,
}

impl StravaClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self::with_base_url(http, STRAVA_API_URL)
    }

    /// Client against another API root (e.g. a local test server).
    pub fn with_base_url(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Check response status and parse the JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                tracing::warn!("Strava rate limit hit (429)");
            }

            return Err(AppError::Api(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Api(format!("JSON parse error: {}", e)))
    }
}

#[async_trait]
impl ActivityApi for StravaClient {
    async fn list_since(&self, access_token: &str, after: i64) -> Result<Vec<ActivitySummary>> {
        let url = format!("{}/athlete/activities", self.base_url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .query(&[
                ("after", after.to_string()),
                ("per_page", PAGE_SIZE.to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Api(e.to_string()))?;

        self.check_response_json(response).await
    }

    async fn fetch_detail(&self, access_token: &str, activity_id: u64) -> Result<Activity> {
        let url = format!("{}/activities/{}", self.base_url, activity_id);

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::Api(e.to_string()))?;

        self.check_response_json(response).await
    }

    async fn update(
        &self,
        access_token: &str,
        activity_id: u64,
        update: &ActivityUpdate,
    ) -> Result<Activity> {
        let url = format!("{}/activities/{}", self.base_url, activity_id);

        let response = self
            .http
            .put(&url)
            .bearer_auth(access_token)
            .json(update)
            .send()
            .await
            .map_err(|e| AppError::Api(e.to_string()))?;

        self.check_response_json(response).await
    }
}
