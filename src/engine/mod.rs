//! Single-lead scoring pipeline over the store seam.
//!
//! The pipeline within one lead is strictly sequential: fetch, extract,
//! score, classify, recommend, persist. Concurrency lives one level up, in
//! [`batch`], where independent leads fan out.

pub mod batch;

use crate::config::{self, BatchConfig};
use crate::core::Lead;
use crate::errors::ScoreError;
use crate::scoring::factors::build_factors;
use crate::scoring::{score_factors, LeadScore, ScoringFactors};
use crate::store::{ActivityStore, LeadStore};
use self::batch::BatchReport;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// Façade over the scoring pipeline.
///
/// Cheap to clone; both stores sit behind `Arc`s so a clone per batch worker
/// shares the same backends.
#[derive(Clone)]
pub struct LeadScoringEngine {
    leads: Arc<dyn LeadStore>,
    activities: Arc<dyn ActivityStore>,
    batch_config: BatchConfig,
}

impl LeadScoringEngine {
    pub fn new(leads: Arc<dyn LeadStore>, activities: Arc<dyn ActivityStore>) -> Self {
        Self {
            leads,
            activities,
            batch_config: config::get_batch_config(),
        }
    }

    /// Override the batch tuning for this engine instance.
    pub fn with_batch_config(mut self, batch_config: BatchConfig) -> Self {
        self.batch_config = batch_config;
        self
    }

    pub(crate) fn batch_config(&self) -> &BatchConfig {
        &self.batch_config
    }

    /// Fetch a lead's data and distill it into scoring factors.
    ///
    /// Fails only when the lead id itself does not resolve or a store read
    /// errors; missing activities or a dangling campaign reference degrade to
    /// defaults.
    pub async fn extract_factors(&self, id: Uuid) -> Result<ScoringFactors, ScoreError> {
        let lead = self.fetch_lead(id).await?;
        let activities = self.activities.activities_for_lead(id).await?;
        let campaign = match lead.campaign_id {
            Some(campaign_id) => self.leads.fetch_campaign(campaign_id).await?,
            None => None,
        };
        Ok(build_factors(&lead, &activities, campaign.as_ref(), Utc::now()))
    }

    /// Score a single lead without persisting the result.
    pub async fn score_lead(&self, id: Uuid) -> Result<LeadScore, ScoreError> {
        let factors = self.extract_factors(id).await?;
        Ok(score_factors(&factors))
    }

    /// Score a single lead and merge the snapshot onto its record.
    ///
    /// Single-lead mode surfaces every failure to the caller; the batch
    /// orchestrator is what isolates them.
    pub async fn score_and_persist(&self, id: Uuid) -> Result<LeadScore, ScoreError> {
        let score = self.score_lead(id).await?;
        self.persist_snapshot(id, &score).await?;
        Ok(score)
    }

    /// Recompute scores for every lead, optionally scoped to one campaign.
    ///
    /// Per-lead failures are isolated and reported through the returned
    /// [`BatchReport`]; only a failure to list the scoped leads at all is
    /// fatal to the sweep.
    pub async fn recalculate(&self, campaign: Option<Uuid>) -> Result<BatchReport, ScoreError> {
        let ids = self.leads.list_lead_ids(campaign).await?;
        log::debug!("recalculating scores for {} leads", ids.len());
        Ok(batch::run(self, ids).await)
    }

    async fn fetch_lead(&self, id: Uuid) -> Result<Lead, ScoreError> {
        self.leads
            .fetch_lead(id)
            .await?
            .ok_or(ScoreError::LeadNotFound { id })
    }

    /// Write the snapshot, retrying transient store failures a bounded number
    /// of times. Last write wins; no version checks.
    async fn persist_snapshot(&self, id: Uuid, score: &LeadScore) -> Result<(), ScoreError> {
        let retries = self.batch_config.persist_retries;
        let mut attempt = 0;
        loop {
            let patch = score.snapshot_patch(Utc::now());
            match self.leads.merge_custom_data(id, patch).await {
                Ok(()) => return Ok(()),
                Err(e) if e.is_retryable() && attempt < retries => {
                    attempt += 1;
                    log::debug!("retrying snapshot write for lead {id} (attempt {attempt}): {e}");
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}
