// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Namelizer CLI
//!
//! Single-shot batch run: authorize on first use, otherwise rewrite any new
//! marked activities and report how many were updated.

use anyhow::Context;
use namelizer::{
    config::UserConfig, services::RunOutcome, state::StateFile, time_utils::now_unix,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let paths = namelizer::paths();
    tracing::debug!(config = %paths.config.display(), state = %paths.state.display(), "Using files");

    let config = UserConfig::load(&paths.config)
        .with_context(|| format!("Failed to load config from {}", paths.config.display()))?;

    let state_file = StateFile::new(&paths.state);
    let mut state = state_file
        .load()
        .with_context(|| format!("Failed to load state from {}", paths.state.display()))?
        .merge(&config.state_overrides);

    let orchestrator = namelizer::build_orchestrator(config)?;

    let outcome = match orchestrator.run(&mut state, now_unix()).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(kind = e.kind(), error = %e, "Run aborted");
            return Err(e.into());
        }
    };

    state_file
        .save(&state)
        .with_context(|| format!("Failed to save state to {}", state_file.path().display()))?;

    match outcome {
        RunOutcome::Authorized => println!(
            "Success! You have been authenticated.\n\
             Running namelizer again will now update any new activities."
        ),
        RunOutcome::Updated(count) => println!("Updated {} activities", count),
    }

    Ok(())
}

/// Initialize logging to stderr; `LOG_FORMAT=json` selects structured JSON.
fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("namelizer=info,warn"));

    let json = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    let format = if json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(false)
            .with_current_span(true)
            .flatten_event(true)
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .boxed()
    };

    tracing_subscriber::registry().with(filter).with(format).init();
}
