// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Strava activity records as fetched from and sent to the API.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Detailed activity record.
///
/// Only the fields the pipeline inspects are typed; everything else Strava
/// returns is kept in `extra` so templates can reach it as
/// `activity.<field>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Wall-clock start time at the activity location (`YYYY-MM-DDTHH:MM:SSZ`)
    pub start_date_local: String,
    /// `[lat, lng]`, or empty for activities without GPS
    #[serde(default, deserialize_with = "null_as_empty")]
    pub start_latlng: Vec<f64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub end_latlng: Vec<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Activity {
    /// Start coordinates, if the activity has GPS data.
    pub fn start_point(&self) -> Option<LatLng> {
        LatLng::from_slice(&self.start_latlng)
    }

    /// End coordinates, if the activity has GPS data.
    pub fn end_point(&self) -> Option<LatLng> {
        LatLng::from_slice(&self.end_latlng)
    }

    /// Current value of an updatable field.
    pub fn field(&self, field: ActivityField) -> Option<&str> {
        match field {
            ActivityField::Name => Some(self.name.as_str()),
            ActivityField::Description => self.description.as_deref(),
        }
    }
}

/// Strava sends `null` instead of `[]` for some manual activities.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
    Ok(Option::<Vec<f64>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Summary activity for the list endpoint (no description).
#[derive(Debug, Clone, Deserialize)]
pub struct ActivitySummary {
    pub id: u64,
    pub name: String,
    pub start_date_local: String,
}

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    fn from_slice(coords: &[f64]) -> Option<Self> {
        match coords {
            [lat, lng] => Some(Self {
                lat: *lat,
                lng: *lng,
            }),
            _ => None,
        }
    }
}

/// Activity fields the pipeline can rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityField {
    Name,
    Description,
}

impl ActivityField {
    pub const ALL: [ActivityField; 2] = [ActivityField::Name, ActivityField::Description];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityField::Name => "name",
            ActivityField::Description => "description",
        }
    }
}

/// Partial update body for `PUT /activities/{id}`.
///
/// Fields left as `None` are omitted and stay unchanged on Strava.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActivityUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ActivityUpdate {
    pub fn set(&mut self, field: ActivityField, value: String) {
        match field {
            ActivityField::Name => self.name = Some(value),
            ActivityField::Description => self.description = Some(value),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}
