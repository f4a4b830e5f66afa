//! Boundary traits for the collaborating lead and activity stores.
//!
//! The engine never talks to a database directly; it consumes these traits
//! and writes score snapshots back through a merge-style partial update that
//! must leave unrelated custom keys untouched.

pub mod memory;

use crate::core::{Activity, Campaign, CustomData, Lead};
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// Failure raised by a store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Transient backend failure (connection loss, saturation).
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Terminal backend failure.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StoreError {
    /// Transient failures are worth a bounded retry; terminal ones are not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

/// Read/write access to lead records and their campaigns.
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Fetch a single lead. `Ok(None)` means the id does not resolve.
    async fn fetch_lead(&self, id: Uuid) -> Result<Option<Lead>, StoreError>;

    /// Fetch a campaign. A dangling reference resolves to `Ok(None)`.
    async fn fetch_campaign(&self, id: Uuid) -> Result<Option<Campaign>, StoreError>;

    /// List lead ids, optionally scoped to one campaign.
    async fn list_lead_ids(&self, campaign: Option<Uuid>) -> Result<Vec<Uuid>, StoreError>;

    /// Merge `patch` into the lead's custom-data bag. Keys present in the
    /// patch overwrite; keys absent from the patch are left untouched.
    async fn merge_custom_data(&self, id: Uuid, patch: CustomData) -> Result<(), StoreError>;
}

/// Read access to a lead's interaction history.
#[async_trait]
pub trait ActivityStore: Send + Sync {
    /// All activities for a lead, ordered newest-first.
    async fn activities_for_lead(&self, lead_id: Uuid) -> Result<Vec<Activity>, StoreError>;
}
