// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod tokens;

pub use activity::{Activity, ActivityField, ActivitySummary, ActivityUpdate, LatLng};
pub use tokens::{Credentials, ScanState, TokenResponse};
