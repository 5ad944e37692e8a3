// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! On-demand weather and location lookups for template rendering.
//!
//! Lookups are gated on the literal template text: a template that never
//! mentions `weather` or `location` never causes a call to the (paid,
//! rate-limited) services. Nothing is cached between activities.

use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::Activity;
use crate::services::geocode::Geocoder;
use crate::services::weather::WeatherApi;
use crate::time_utils::local_timestamp;

/// Auxiliary data referenced by the templates being rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TemplateNeeds {
    pub weather: bool,
    pub location: bool,
}

impl TemplateNeeds {
    /// Scan template sources for the `weather` and `location` substrings.
    pub fn scan<'a, I>(templates: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        templates
            .into_iter()
            .fold(TemplateNeeds::default(), |needs, template| TemplateNeeds {
                weather: needs.weather || template.contains("weather"),
                location: needs.location || template.contains("location"),
            })
    }
}

/// Resolved auxiliary data; `None` where not needed or not available.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Enrichment {
    pub weather: Option<Value>,
    pub start_location: Option<Value>,
    pub end_location: Option<Value>,
}

/// Fetches weather and addresses for an activity.
pub struct EnrichmentResolver {
    /// `None` when no weather API key is configured
    weather: Option<Box<dyn WeatherApi>>,
    geocoder: Box<dyn Geocoder>,
}

impl EnrichmentResolver {
    pub fn new(weather: Option<Box<dyn WeatherApi>>, geocoder: Box<dyn Geocoder>) -> Self {
        Self { weather, geocoder }
    }

    /// Resolve whatever `needs` asks for.
    pub async fn resolve(&self, activity: &Activity, needs: TemplateNeeds) -> Result<Enrichment> {
        let mut enrichment = Enrichment::default();

        if needs.weather {
            enrichment.weather = self.resolve_weather(activity).await?;
        }

        if needs.location {
            let (start, end) = self.resolve_locations(activity).await?;
            enrichment.start_location = start;
            enrichment.end_location = end;
        }

        Ok(enrichment)
    }

    /// Weather at the activity's start time and place.
    pub async fn resolve_weather(&self, activity: &Activity) -> Result<Option<Value>> {
        let weather = self.weather.as_ref().ok_or_else(|| {
            AppError::Config("Template references weather but no weather_api_key is set".to_string())
        })?;

        let Some(start) = activity.start_point() else {
            tracing::debug!(activity_id = activity.id, "No start coordinates, skipping weather");
            return Ok(None);
        };

        let dt = local_timestamp(&activity.start_date_local)
            .map_err(|e| AppError::Enrichment(e.to_string()))?;

        tracing::debug!(activity_id = activity.id, dt, "Fetching weather");
        weather.weather_at(dt, start.lat, start.lng).await
    }

    /// Addresses of the start and end points, looked up independently.
    pub async fn resolve_locations(
        &self,
        activity: &Activity,
    ) -> Result<(Option<Value>, Option<Value>)> {
        let start = match activity.start_point() {
            Some(p) => self.geocoder.reverse(p.lat, p.lng).await?,
            None => None,
        };

        let end = match activity.end_point() {
            Some(p) => self.geocoder.reverse(p.lat, p.lng).await?,
            None => None,
        };

        tracing::debug!(
            activity_id = activity.id,
            start_found = start.is_some(),
            end_found = end.is_some(),
            "Resolved locations"
        );
        Ok((start, end))
    }
}
