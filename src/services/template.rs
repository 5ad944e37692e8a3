// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Jinja-style rendering of name/description templates.
//!
//! Templates see exactly four variables: `activity`, `start_location`,
//! `end_location` and `weather`. Any of the last three may be `none`.
//! Undefined values are semi-strict: printing a field of a `none` variable
//! or a key the activity lacks is an error, while `{% if ... %}` tests on
//! them are simply false.

use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;
use crate::models::Activity;
use crate::services::enrichment::Enrichment;

/// Variables bound while rendering one activity.
#[derive(Debug, Serialize)]
pub struct RenderContext<'a> {
    pub activity: &'a Activity,
    pub start_location: Option<&'a Value>,
    pub end_location: Option<&'a Value>,
    pub weather: Option<&'a Value>,
}

impl<'a> RenderContext<'a> {
    pub fn new(activity: &'a Activity, enrichment: &'a Enrichment) -> Self {
        Self {
            activity,
            start_location: enrichment.start_location.as_ref(),
            end_location: enrichment.end_location.as_ref(),
            weather: enrichment.weather.as_ref(),
        }
    }
}

/// Template renderer.
pub struct TemplateRenderer {
    env: Environment<'static>,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::SemiStrict);
        Self { env }
    }

    /// Check that a template parses.
    pub fn validate(&self, source: &str) -> Result<()> {
        self.env.template_from_str(source)?;
        Ok(())
    }

    pub fn render(&self, source: &str, context: &RenderContext<'_>) -> Result<String> {
        Ok(self.env.render_str(source, context)?)
    }
}
