// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types.
//!
//! None of these are recovered locally: every variant aborts the current run
//! and is reported to the operator.

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Strava API error: {0}")]
    Api(String),

    #[error("Enrichment error: {0}")]
    Enrichment(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("State file error: {0}")]
    State(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Short stable label used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Config(_) => "config",
            AppError::Auth(_) => "auth",
            AppError::Api(_) => "api",
            AppError::Enrichment(_) => "enrichment",
            AppError::Template(_) => "template",
            AppError::State(_) => "state",
            AppError::Internal(_) => "internal",
        }
    }
}

impl From<minijinja::Error> for AppError {
    fn from(err: minijinja::Error) -> Self {
        AppError::Template(err.to_string())
    }
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AppError>;
