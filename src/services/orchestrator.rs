// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! One batch run: authorize or refresh, then run the update pipeline.
//!
//! The caller loads [`StoredState`] before the run and persists it after a
//! successful one. On error nothing is rolled back: updates already pushed to
//! Strava remain and the caller simply does not save.

use crate::error::Result;
use crate::services::auth::{extract_code, TokenGrant};
use crate::services::pipeline::UpdatePipeline;
use crate::services::prompt::AuthorizationPrompt;
use crate::services::strava::ActivityApi;
use crate::state::StoredState;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// No tokens were stored; initial authorization completed instead of a scan
    Authorized,
    /// Scan completed, with the number of activities updated
    Updated(usize),
}

/// Drives a run from stored state to outcome.
pub struct Orchestrator<T, A, P> {
    auth: T,
    prompt: P,
    pipeline: UpdatePipeline<A>,
}

impl<T, A, P> Orchestrator<T, A, P>
where
    T: TokenGrant,
    A: ActivityApi,
    P: AuthorizationPrompt,
{
    pub fn new(auth: T, prompt: P, pipeline: UpdatePipeline<A>) -> Self {
        Self {
            auth,
            prompt,
            pipeline,
        }
    }

    /// Run once at wall-clock time `now` (unix seconds).
    pub async fn run(&self, state: &mut StoredState, now: i64) -> Result<RunOutcome> {
        self.pipeline.validate_templates()?;

        let Some(stored) = state.credentials() else {
            self.authorize(state, now).await?;
            return Ok(RunOutcome::Authorized);
        };

        let credentials = if stored.is_expired(now) {
            tracing::info!(expires_at = stored.expires_at, "Access token expired, refreshing");
            let fresh = self.auth.refresh(&stored.refresh_token).await?;
            state.store_credentials(&fresh);
            fresh
        } else {
            stored
        };

        let pass = self
            .pipeline
            .run(&credentials.access_token, state.scan())
            .await?;
        state.store_scan(&pass.scan);

        tracing::info!(
            count = pass.updated,
            last_check = pass.scan.last_check,
            "Scan complete"
        );
        Ok(RunOutcome::Updated(pass.updated))
    }

    /// Interactive first-time authorization.
    ///
    /// The watermark starts at `now`, so activities recorded before the tool
    /// was authorized are never rewritten.
    async fn authorize(&self, state: &mut StoredState, now: i64) -> Result<()> {
        tracing::info!("No refresh token stored, starting authorization");

        let url = self.auth.authorization_url();
        let redirect = self.prompt.redirect_url(&url)?;
        let code = extract_code(&redirect)?;

        let credentials = self.auth.exchange_authorization_code(&code).await?;
        state.store_credentials(&credentials);
        state.last_check = Some(now);

        Ok(())
    }
}
