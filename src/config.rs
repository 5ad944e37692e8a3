// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User configuration loaded from a YAML file.
//!
//! The file is parsed into an all-optional raw document first and then
//! validated into [`UserConfig`], so a missing key is reported as a
//! configuration error naming that key rather than as a parse failure.

use std::env;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::ActivityField;
use crate::state::StoredState;

/// Default config file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";
/// Default persisted state file, relative to the working directory.
pub const DEFAULT_STATE_PATH: &str = "state.yaml";

/// Locations of the config and state files.
#[derive(Debug, Clone)]
pub struct Paths {
    pub config: PathBuf,
    pub state: PathBuf,
}

impl Paths {
    /// Resolve file locations from `NAMELIZER_CONFIG` / `NAMELIZER_STATE`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self {
            config: env::var("NAMELIZER_CONFIG")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH)),
            state: env::var("NAMELIZER_STATE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_STATE_PATH)),
        }
    }
}

/// Validated user configuration.
#[derive(Debug, Clone)]
pub struct UserConfig {
    /// Strava OAuth client ID
    pub client_id: String,
    /// Strava OAuth client secret
    pub client_secret: String,
    /// Marker an activity field must start with to be rewritten
    pub special_char: Option<char>,
    pub name_template: Option<String>,
    pub des_template: Option<String>,
    /// OpenWeather API key
    pub weather_api_key: Option<String>,
    /// State keys set in the config file; these win over persisted state
    pub state_overrides: StoredState,
}

impl UserConfig {
    /// Load and validate the config file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&contents)
    }

    /// Parse and validate a YAML config document.
    pub fn from_yaml(contents: &str) -> Result<Self> {
        let raw: RawConfig = serde_yaml::from_str(contents)
            .map_err(|e| AppError::Config(format!("Invalid YAML: {}", e)))?;
        raw.try_into()
    }

    /// Template configured for a field, if any.
    pub fn template_for(&self, field: ActivityField) -> Option<&str> {
        match field {
            ActivityField::Name => self.name_template.as_deref(),
            ActivityField::Description => self.des_template.as_deref(),
        }
    }
}

/// Config document exactly as written by the user.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    client_id: Option<ClientId>,
    client_secret: Option<String>,
    special_char: Option<String>,
    name_template: Option<String>,
    des_template: Option<String>,
    weather_api_key: Option<String>,
    #[serde(flatten)]
    state: StoredState,
}

/// Strava client IDs are numeric, but quoting them is just as common.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClientId {
    Number(u64),
    Text(String),
}

impl ClientId {
    fn into_string(self) -> String {
        match self {
            ClientId::Number(n) => n.to_string(),
            ClientId::Text(s) => s.trim().to_string(),
        }
    }
}

impl TryFrom<RawConfig> for UserConfig {
    type Error = AppError;

    fn try_from(raw: RawConfig) -> Result<Self> {
        let client_id = raw
            .client_id
            .map(ClientId::into_string)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::Config("Missing required key: client_id".to_string()))?;

        let client_secret = raw
            .client_secret
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::Config("Missing required key: client_secret".to_string()))?;

        let special_char = match raw.special_char.as_deref() {
            None | Some("") => None,
            Some(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(c),
                    _ => {
                        return Err(AppError::Config(format!(
                            "special_char must be a single character, got {:?}",
                            s
                        )))
                    }
                }
            }
        };

        if raw.name_template.is_none() && raw.des_template.is_none() {
            return Err(AppError::Config(
                "At least one of name_template or des_template is required".to_string(),
            ));
        }

        Ok(Self {
            client_id,
            client_secret,
            special_char,
            name_template: raw.name_template,
            des_template: raw.des_template,
            weather_api_key: raw.weather_api_key.filter(|k| !k.trim().is_empty()),
            state_overrides: raw.state,
        })
    }
}
