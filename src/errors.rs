//! Engine error taxonomy.
//!
//! Three failure modes are fatal to a single-lead request: the lead id does
//! not resolve, a store operation fails, or the per-lead budget expires.
//! Missing *related* data (activities, campaign, custom fields) is not an
//! error anywhere in the pipeline; extraction degrades to defaults instead.
//! In batch mode every variant is isolated to its lead and reported through
//! the sweep's `BatchReport`.

use crate::store::StoreError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ScoreError {
    /// The lead identifier does not resolve to an existing record.
    #[error("lead {id} not found")]
    LeadNotFound { id: Uuid },

    /// A read or write against a collaborating store failed.
    #[error("store operation failed: {0}")]
    Store(#[from] StoreError),

    /// The per-lead pipeline exceeded its wall-clock budget.
    #[error("scoring lead {id} timed out after {timeout_secs}s")]
    Timeout { id: Uuid, timeout_secs: u64 },
}

impl ScoreError {
    /// Whether retrying the same operation could succeed.
    ///
    /// Only transient store failures qualify; a missing lead or an expired
    /// budget will not improve on immediate retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            ScoreError::Store(e) => e.is_retryable(),
            ScoreError::LeadNotFound { .. } | ScoreError::Timeout { .. } => false,
        }
    }
}
