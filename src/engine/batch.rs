//! Batch recalculation sweep.
//!
//! Leads are mutually independent, so the sweep fans out to a bounded number
//! of concurrent workers with no ordering guarantee between leads. Every
//! per-lead failure (extraction, scoring, timeout, persistence) is caught,
//! logged with the lead id, and recorded in the report; the sweep always
//! attempts every scoped lead. This trades per-lead correctness for
//! availability of the overall recompute.

use crate::engine::LeadScoringEngine;
use crate::errors::ScoreError;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::time::Duration;
use uuid::Uuid;

/// One isolated per-lead failure inside a sweep.
#[derive(Debug, Clone, Serialize)]
pub struct BatchFailure {
    pub lead_id: Uuid,
    pub error: String,
}

/// Outcome accumulator for a recalculation sweep.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub succeeded: Vec<Uuid>,
    pub failed: Vec<BatchFailure>,
}

impl BatchReport {
    /// Total leads the sweep attempted.
    pub fn attempted(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    /// Whether every attempted lead was scored and persisted.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Run the sweep over the given lead ids.
pub(crate) async fn run(engine: &LeadScoringEngine, ids: Vec<Uuid>) -> BatchReport {
    let batch_config = *engine.batch_config();
    let budget = Duration::from_secs(batch_config.lead_timeout_secs);
    let concurrency = batch_config.max_concurrency.max(1);

    let outcomes: Vec<(Uuid, Result<(), ScoreError>)> = stream::iter(ids)
        .map(|id| score_one(engine, id, budget, batch_config.lead_timeout_secs))
        .buffer_unordered(concurrency)
        .collect()
        .await;

    let mut report = BatchReport::default();
    for (id, outcome) in outcomes {
        match outcome {
            Ok(()) => report.succeeded.push(id),
            Err(e) => {
                log::warn!("batch scoring failed for lead {id}: {e}");
                report.failed.push(BatchFailure {
                    lead_id: id,
                    error: e.to_string(),
                });
            }
        }
    }

    log::debug!(
        "batch sweep finished: {} succeeded, {} failed",
        report.succeeded.len(),
        report.failed.len()
    );
    report
}

/// Score one lead under the per-lead wall-clock budget. A timeout is an
/// isolated failure like any other; it never cancels sibling leads.
async fn score_one(
    engine: &LeadScoringEngine,
    id: Uuid,
    budget: Duration,
    timeout_secs: u64,
) -> (Uuid, Result<(), ScoreError>) {
    let outcome = match tokio::time::timeout(budget, engine.score_and_persist(id)).await {
        Ok(result) => result.map(|_| ()),
        Err(_) => Err(ScoreError::Timeout { id, timeout_secs }),
    };
    (id, outcome)
}
