//! In-memory reference implementation of the store traits.
//!
//! Backs the integration tests and doubles as a template for real adapters.
//! Read/write fault injection lets tests exercise the batch orchestrator's
//! per-lead isolation without a real backend.

use crate::core::{Activity, Campaign, CustomData, Lead};
use crate::store::{ActivityStore, LeadStore, StoreError};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

#[derive(Default)]
struct State {
    leads: HashMap<Uuid, Lead>,
    campaigns: HashMap<Uuid, Campaign>,
    activities: HashMap<Uuid, Vec<Activity>>,
    fail_reads: HashSet<Uuid>,
    fail_writes: HashSet<Uuid>,
}

/// Thread-safe in-memory lead/activity store.
#[derive(Default)]
pub struct InMemoryStore {
    state: RwLock<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_lead(&self, lead: Lead) {
        self.state.write().leads.insert(lead.id, lead);
    }

    pub fn insert_campaign(&self, campaign: Campaign) {
        self.state.write().campaigns.insert(campaign.id, campaign);
    }

    /// Attach an activity to its lead, keeping the history newest-first.
    pub fn record_activity(&self, activity: Activity) {
        let mut state = self.state.write();
        let history = state.activities.entry(activity.lead_id).or_default();
        history.push(activity);
        history.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
    }

    /// Make every read touching `lead_id` fail with a transient error.
    pub fn fail_reads_for(&self, lead_id: Uuid) {
        self.state.write().fail_reads.insert(lead_id);
    }

    /// Make every custom-data write for `lead_id` fail with a transient error.
    pub fn fail_writes_for(&self, lead_id: Uuid) {
        self.state.write().fail_writes.insert(lead_id);
    }

    /// Clear fault injection for `lead_id`.
    pub fn heal(&self, lead_id: Uuid) {
        let mut state = self.state.write();
        state.fail_reads.remove(&lead_id);
        state.fail_writes.remove(&lead_id);
    }

    /// Current snapshot of a lead, for assertions.
    pub fn get_lead(&self, id: Uuid) -> Option<Lead> {
        self.state.read().leads.get(&id).cloned()
    }

    fn check_read(state: &State, lead_id: Uuid) -> Result<(), StoreError> {
        if state.fail_reads.contains(&lead_id) {
            Err(StoreError::Unavailable(format!(
                "injected read failure for {lead_id}"
            )))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl LeadStore for InMemoryStore {
    async fn fetch_lead(&self, id: Uuid) -> Result<Option<Lead>, StoreError> {
        let state = self.state.read();
        Self::check_read(&state, id)?;
        Ok(state.leads.get(&id).cloned())
    }

    async fn fetch_campaign(&self, id: Uuid) -> Result<Option<Campaign>, StoreError> {
        Ok(self.state.read().campaigns.get(&id).cloned())
    }

    async fn list_lead_ids(&self, campaign: Option<Uuid>) -> Result<Vec<Uuid>, StoreError> {
        let state = self.state.read();
        let mut ids: Vec<Uuid> = state
            .leads
            .values()
            .filter(|lead| campaign.is_none() || lead.campaign_id == campaign)
            .map(|lead| lead.id)
            .collect();
        // Stable order keeps test output reproducible; batch order is
        // otherwise unspecified.
        ids.sort();
        Ok(ids)
    }

    async fn merge_custom_data(&self, id: Uuid, patch: CustomData) -> Result<(), StoreError> {
        let mut state = self.state.write();
        if state.fail_writes.contains(&id) {
            return Err(StoreError::Unavailable(format!(
                "injected write failure for {id}"
            )));
        }
        let lead = state
            .leads
            .get_mut(&id)
            .ok_or_else(|| StoreError::Other(anyhow::anyhow!("lead {id} vanished mid-update")))?;
        for (key, value) in patch {
            lead.custom_data.insert(key, value);
        }
        Ok(())
    }
}

#[async_trait]
impl ActivityStore for InMemoryStore {
    async fn activities_for_lead(&self, lead_id: Uuid) -> Result<Vec<Activity>, StoreError> {
        let state = self.state.read();
        Self::check_read(&state, lead_id)?;
        Ok(state.activities.get(&lead_id).cloned().unwrap_or_default())
    }
}
