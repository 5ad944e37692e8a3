// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OAuth credentials and the incremental-scan watermark.

use serde::Deserialize;

/// Strava OAuth credentials.
///
/// The access token is only usable while `now < expires_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_token: String,
    pub refresh_token: String,
    /// Unix time the access token stops working
    pub expires_at: i64,
}

impl Credentials {
    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.expires_at
    }
}

/// Token response from `POST /oauth/token`.
///
/// Every field is required so a partial response fails to parse and is
/// never applied.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
}

impl From<TokenResponse> for Credentials {
    fn from(response: TokenResponse) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            expires_at: response.expires_at,
        }
    }
}

/// Boundary of already-processed activities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanState {
    /// Unix time; only activities starting after it are listed
    pub last_check: i64,
}

impl ScanState {
    /// Move the watermark to `timestamp`, never backwards.
    pub fn advance_to(&mut self, timestamp: i64) {
        self.last_check = self.last_check.max(timestamp);
    }
}
