// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Namelizer: rename Strava activities from templates.
//!
//! Each run scans activities recorded since the last run, picks those whose
//! name or description starts with a marker character, and rewrites them
//! from user templates filled with activity data, weather and reverse
//! geocoded start/end locations.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod time_utils;

use config::{Paths, UserConfig};
use error::Result;
use services::{
    AuthClient, ConsolePrompt, EnrichmentResolver, NominatimClient, OpenWeatherClient,
    Orchestrator, StravaClient, UpdatePipeline, WeatherApi,
};

/// Orchestrator wired to the real Strava, OpenWeather and Nominatim services.
pub type LiveOrchestrator = Orchestrator<AuthClient, StravaClient, ConsolePrompt>;

/// Build the live orchestrator for `config`.
pub fn build_orchestrator(config: UserConfig) -> Result<LiveOrchestrator> {
    let http = services::http_client()?;

    let weather: Option<Box<dyn WeatherApi>> = config.weather_api_key.clone().map(|key| {
        Box::new(OpenWeatherClient::new(http.clone(), key)) as Box<dyn WeatherApi>
    });
    let resolver = EnrichmentResolver::new(weather, Box::new(NominatimClient::new(http.clone())));

    let auth = AuthClient::new(
        http.clone(),
        config.client_id.clone(),
        config.client_secret.clone(),
    );
    let pipeline = UpdatePipeline::new(config, StravaClient::new(http), resolver);

    Ok(Orchestrator::new(auth, ConsolePrompt, pipeline))
}

/// File locations for this process.
pub fn paths() -> Paths {
    Paths::from_env()
}
