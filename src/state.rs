// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Persisted run state: OAuth tokens and the scan watermark.
//!
//! Stored as a flat YAML mapping, loaded once at startup and rewritten
//! wholesale after a successful run (or right after initial authorization).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{Credentials, ScanState};

/// Flat key/value state record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_check: Option<i64>,
}

impl StoredState {
    /// Overlay `overrides` on top of this state; keys present there win.
    pub fn merge(self, overrides: &StoredState) -> StoredState {
        StoredState {
            access_token: overrides.access_token.clone().or(self.access_token),
            refresh_token: overrides.refresh_token.clone().or(self.refresh_token),
            expires_at: overrides.expires_at.or(self.expires_at),
            last_check: overrides.last_check.or(self.last_check),
        }
    }

    /// Whether a refresh token has been stored, i.e. authorization happened.
    pub fn has_refresh_token(&self) -> bool {
        self.refresh_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Stored credentials.
    ///
    /// A refresh token without an access token or expiry still counts: the
    /// access token is then treated as already expired so the first step of
    /// the run is a refresh.
    pub fn credentials(&self) -> Option<Credentials> {
        if !self.has_refresh_token() {
            return None;
        }

        Some(Credentials {
            access_token: self.access_token.clone().unwrap_or_default(),
            refresh_token: self.refresh_token.clone().unwrap_or_default(),
            expires_at: match &self.access_token {
                Some(_) => self.expires_at.unwrap_or(0),
                None => 0,
            },
        })
    }

    /// Overwrite all three token fields at once.
    pub fn store_credentials(&mut self, credentials: &Credentials) {
        self.access_token = Some(credentials.access_token.clone());
        self.refresh_token = Some(credentials.refresh_token.clone());
        self.expires_at = Some(credentials.expires_at);
    }

    pub fn scan(&self) -> ScanState {
        ScanState {
            last_check: self.last_check.unwrap_or(0),
        }
    }

    pub fn store_scan(&mut self, scan: &ScanState) {
        self.last_check = Some(scan.last_check);
    }
}

/// State file on disk.
#[derive(Debug, Clone)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the state; a missing file is an empty state.
    pub fn load(&self) -> Result<StoredState> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "No state file, starting fresh");
            return Ok(StoredState::default());
        }

        let contents = std::fs::read_to_string(&self.path).map_err(|e| {
            AppError::State(format!("Failed to read {}: {}", self.path.display(), e))
        })?;

        if contents.trim().is_empty() {
            return Ok(StoredState::default());
        }

        serde_yaml::from_str(&contents).map_err(|e| {
            AppError::State(format!("Failed to parse {}: {}", self.path.display(), e))
        })
    }

    /// Rewrite the whole state file.
    pub fn save(&self, state: &StoredState) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::State(format!(
                    "Failed to create state directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let contents = serde_yaml::to_string(state)
            .map_err(|e| AppError::State(format!("Failed to serialize state: {}", e)))?;

        std::fs::write(&self.path, contents).map_err(|e| {
            AppError::State(format!("Failed to write {}: {}", self.path.display(), e))
        })?;

        tracing::debug!(path = %self.path.display(), "State saved");
        Ok(())
    }
}
