// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - remote clients and the update pipeline.

pub mod auth;
pub mod enrichment;
pub mod geocode;
pub mod orchestrator;
pub mod pipeline;
pub mod prompt;
pub mod strava;
pub mod template;
pub mod weather;

pub use auth::{AuthClient, TokenGrant};
pub use enrichment::{Enrichment, EnrichmentResolver, TemplateNeeds};
pub use geocode::{Geocoder, NominatimClient};
pub use orchestrator::{Orchestrator, RunOutcome};
pub use pipeline::{select_fields, PassSummary, UpdatePipeline};
pub use prompt::{AuthorizationPrompt, ConsolePrompt};
pub use strava::{ActivityApi, StravaClient};
pub use template::{RenderContext, TemplateRenderer};
pub use weather::{OpenWeatherClient, WeatherApi};

use std::time::Duration;

use crate::error::{AppError, Result};

/// Timeout applied to every outbound request. Requests are never retried.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(5);

/// Build the HTTP client shared by all remote services.
pub fn http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .user_agent(concat!("namelizer/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to build HTTP client: {}", e)))
}
