//! Single-lead pipeline against the in-memory store: persistence merge
//! semantics, snapshot overwrite, retry behavior, and error surfacing.

mod common;

use async_trait::async_trait;
use common::{call_activity, email_activity, sample_campaign, sample_lead};
use leadscore::scoring::{LAST_SCORED_KEY, SNAPSHOT_KEY};
use leadscore::{
    ActivityStore, CustomData, InMemoryStore, LeadScore, LeadScoringEngine, LeadStore, ScoreError,
    StoreError,
};
use serde_json::json;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use uuid::Uuid;

fn engine_over(store: &Arc<InMemoryStore>) -> LeadScoringEngine {
    LeadScoringEngine::new(store.clone(), store.clone())
}

#[tokio::test]
async fn snapshot_is_merged_without_clobbering_other_keys() {
    let store = Arc::new(InMemoryStore::new());
    let campaign = sample_campaign("Premium");
    let mut lead = sample_lead("Ada");
    lead.campaign_id = Some(campaign.id);
    let lead_id = lead.id;

    store.insert_campaign(campaign);
    store.insert_lead(lead);
    store.record_activity(email_activity(lead_id, 1, true, true));
    store.record_activity(call_activity(lead_id, 2, true));

    let engine = engine_over(&store);
    let score = engine.score_and_persist(lead_id).await.unwrap();

    let stored = store.get_lead(lead_id).unwrap();
    // Unrelated custom keys survive the merge
    assert_eq!(stored.custom_data.get("industry"), Some(&json!("logistics")));
    assert!(stored.custom_data.contains_key(LAST_SCORED_KEY));

    let embedded: LeadScore =
        serde_json::from_value(stored.custom_data.get(SNAPSHOT_KEY).unwrap().clone()).unwrap();
    assert_eq!(embedded, score);
}

#[tokio::test]
async fn rescoring_overwrites_the_previous_snapshot() {
    let store = Arc::new(InMemoryStore::new());
    let lead = sample_lead("Grace");
    let lead_id = lead.id;
    store.insert_lead(lead);

    let engine = engine_over(&store);
    let first = engine.score_and_persist(lead_id).await.unwrap();

    // New engagement arrives; the next run supersedes the old snapshot
    store.record_activity(call_activity(lead_id, 0, true));
    store.record_activity(email_activity(lead_id, 1, true, false));
    let second = engine.score_and_persist(lead_id).await.unwrap();
    assert!(second.total_score > first.total_score);

    let stored = store.get_lead(lead_id).unwrap();
    let embedded: LeadScore =
        serde_json::from_value(stored.custom_data.get(SNAPSHOT_KEY).unwrap().clone()).unwrap();
    assert_eq!(embedded, second);
}

#[tokio::test]
async fn unknown_lead_is_reported_not_found() {
    let store = Arc::new(InMemoryStore::new());
    let engine = engine_over(&store);

    let err = engine.score_lead(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, ScoreError::LeadNotFound { .. }));
}

#[tokio::test]
async fn persistent_write_failure_surfaces_in_single_lead_mode() {
    let store = Arc::new(InMemoryStore::new());
    let lead = sample_lead("Edsger");
    let lead_id = lead.id;
    store.insert_lead(lead);
    store.fail_writes_for(lead_id);

    let engine = engine_over(&store);
    let err = engine.score_and_persist(lead_id).await.unwrap_err();
    assert!(matches!(err, ScoreError::Store(_)));

    // The lead record is untouched
    let stored = store.get_lead(lead_id).unwrap();
    assert!(!stored.custom_data.contains_key(SNAPSHOT_KEY));
}

/// Store whose first writes fail with a transient error, then recover.
struct FlakyStore {
    inner: Arc<InMemoryStore>,
    write_failures_left: AtomicU32,
}

#[async_trait]
impl LeadStore for FlakyStore {
    async fn fetch_lead(&self, id: Uuid) -> Result<Option<leadscore::Lead>, StoreError> {
        self.inner.fetch_lead(id).await
    }

    async fn fetch_campaign(&self, id: Uuid) -> Result<Option<leadscore::Campaign>, StoreError> {
        self.inner.fetch_campaign(id).await
    }

    async fn list_lead_ids(&self, campaign: Option<Uuid>) -> Result<Vec<Uuid>, StoreError> {
        self.inner.list_lead_ids(campaign).await
    }

    async fn merge_custom_data(&self, id: Uuid, patch: CustomData) -> Result<(), StoreError> {
        if self.write_failures_left.load(Ordering::SeqCst) > 0 {
            self.write_failures_left.fetch_sub(1, Ordering::SeqCst);
            return Err(StoreError::Unavailable("simulated outage".into()));
        }
        self.inner.merge_custom_data(id, patch).await
    }
}

#[async_trait]
impl ActivityStore for FlakyStore {
    async fn activities_for_lead(
        &self,
        lead_id: Uuid,
    ) -> Result<Vec<leadscore::Activity>, StoreError> {
        self.inner.activities_for_lead(lead_id).await
    }
}

#[tokio::test]
async fn transient_write_failures_are_retried() {
    let inner = Arc::new(InMemoryStore::new());
    let lead = sample_lead("Barbara");
    let lead_id = lead.id;
    inner.insert_lead(lead);

    // Two failures fit inside the default budget of two retries
    let flaky = Arc::new(FlakyStore {
        inner: inner.clone(),
        write_failures_left: AtomicU32::new(2),
    });
    let engine = LeadScoringEngine::new(flaky, inner.clone());

    engine.score_and_persist(lead_id).await.unwrap();
    let stored = inner.get_lead(lead_id).unwrap();
    assert!(stored.custom_data.contains_key(SNAPSHOT_KEY));
}
