// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity update pipeline.
//!
//! Handles one pass over new activities:
//! 1. List activities that started after the watermark
//! 2. Fetch each one and pick the fields to rewrite
//! 3. Resolve weather/location only if those templates mention them
//! 4. Render the templates and push the partial update
//! 5. Advance the watermark to the updated activity's start time

use crate::config::UserConfig;
use crate::error::{AppError, Result};
use crate::models::{Activity, ActivityField, ActivityUpdate, ScanState};
use crate::services::enrichment::{EnrichmentResolver, TemplateNeeds};
use crate::services::strava::ActivityApi;
use crate::services::template::{RenderContext, TemplateRenderer};
use crate::time_utils::local_timestamp;

/// Fields of `activity` that should be rewritten under `config`.
///
/// Without a marker every field that has a template qualifies. With a marker
/// a field qualifies only if it is present and starts with the marker.
pub fn select_fields(config: &UserConfig, activity: &Activity) -> Vec<ActivityField> {
    ActivityField::ALL
        .into_iter()
        .filter(|field| config.template_for(*field).is_some())
        .filter(|field| match config.special_char {
            None => true,
            Some(marker) => activity
                .field(*field)
                .and_then(|value| value.chars().next())
                .is_some_and(|first| first == marker),
        })
        .collect()
}

/// Outcome of one pass over new activities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassSummary {
    /// Number of activities updated on Strava
    pub updated: usize,
    /// Watermark after the pass
    pub scan: ScanState,
}

/// Lists, renders and updates activities.
pub struct UpdatePipeline<A> {
    config: UserConfig,
    activities: A,
    resolver: EnrichmentResolver,
    renderer: TemplateRenderer,
}

impl<A: ActivityApi> UpdatePipeline<A> {
    pub fn new(config: UserConfig, activities: A, resolver: EnrichmentResolver) -> Self {
        Self {
            config,
            activities,
            resolver,
            renderer: TemplateRenderer::new(),
        }
    }

    pub fn activities(&self) -> &A {
        &self.activities
    }

    /// Fail early on templates that do not parse.
    pub fn validate_templates(&self) -> Result<()> {
        for field in ActivityField::ALL {
            if let Some(template) = self.config.template_for(field) {
                self.renderer.validate(template).map_err(|e| {
                    AppError::Template(format!("{} template: {}", field.as_str(), e))
                })?;
            }
        }
        Ok(())
    }

    /// Process every activity that started after `scan.last_check`.
    ///
    /// Activities are handled one at a time. The first error aborts the
    /// pass; updates already pushed to Strava stay in place.
    pub async fn run(&self, access_token: &str, mut scan: ScanState) -> Result<PassSummary> {
        tracing::info!(after = scan.last_check, "Searching for new activities");

        let summaries = self
            .activities
            .list_since(access_token, scan.last_check)
            .await?;
        tracing::debug!(count = summaries.len(), "Listed activities");

        let mut updated = 0;
        for summary in summaries {
            let activity = self
                .activities
                .fetch_detail(access_token, summary.id)
                .await?;

            if let Some(started_at) = self.process_activity(access_token, &activity).await? {
                scan.advance_to(started_at);
                updated += 1;
            }
        }

        Ok(PassSummary { updated, scan })
    }

    /// Render the update for one activity. Empty if nothing qualifies.
    pub async fn build_update(&self, activity: &Activity) -> Result<ActivityUpdate> {
        let fields = select_fields(&self.config, activity);
        let mut update = ActivityUpdate::default();

        if fields.is_empty() {
            return Ok(update);
        }

        let templates: Vec<(ActivityField, &str)> = fields
            .iter()
            .filter_map(|field| self.config.template_for(*field).map(|t| (*field, t)))
            .collect();

        let needs = TemplateNeeds::scan(templates.iter().map(|(_, t)| *t));
        let enrichment = self.resolver.resolve(activity, needs).await?;
        let context = RenderContext::new(activity, &enrichment);

        for (field, template) in templates {
            let rendered = self.renderer.render(template, &context)?;
            update.set(field, rendered);
        }

        Ok(update)
    }

    /// Update one activity; returns its start time if an update was sent.
    async fn process_activity(
        &self,
        access_token: &str,
        activity: &Activity,
    ) -> Result<Option<i64>> {
        let update = self.build_update(activity).await?;

        if update.is_empty() {
            tracing::debug!(activity_id = activity.id, "No marked fields, skipping");
            return Ok(None);
        }

        let stored = self
            .activities
            .update(access_token, activity.id, &update)
            .await?;

        let started_at = local_timestamp(&stored.start_date_local).map_err(|e| {
            AppError::Api(format!(
                "Invalid start_date_local for activity {}: {}",
                stored.id, e
            ))
        })?;

        tracing::info!(
            activity_id = activity.id,
            name = %stored.name,
            name_updated = update.name.is_some(),
            description_updated = update.description.is_some(),
            "Activity updated"
        );

        Ok(Some(started_at))
    }
}
