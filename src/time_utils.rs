// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time conversion.

use chrono::{Local, NaiveDateTime, TimeZone, Utc};

/// Format of Strava's `start_date_local` field.
///
/// The trailing `Z` is literal: the value is wall-clock time at the start
/// location, not UTC.
pub const STRAVA_LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Errors converting activity timestamps.
#[derive(Debug, thiserror::Error)]
pub enum TimeError {
    #[error("invalid timestamp {0:?}: {1}")]
    Parse(String, chrono::ParseError),

    #[error("timestamp {0:?} does not exist in the local time zone")]
    Nonexistent(String),
}

/// Convert a `start_date_local` string into a unix timestamp.
///
/// The naive time is interpreted in the machine's local time zone, so the
/// same string yields the same watermark the original activity listing
/// compares against.
pub fn local_timestamp(start_date_local: &str) -> Result<i64, TimeError> {
    let naive = NaiveDateTime::parse_from_str(start_date_local, STRAVA_LOCAL_FORMAT)
        .map_err(|e| TimeError::Parse(start_date_local.to_string(), e))?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.timestamp())
        .ok_or_else(|| TimeError::Nonexistent(start_date_local.to_string()))
}

/// Current wall-clock time as a unix timestamp.
pub fn now_unix() -> i64 {
    Utc::now().timestamp()
}
