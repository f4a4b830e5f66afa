//! Shared fixtures for the engine integration tests.

#![allow(dead_code)]

use chrono::{Duration, Utc};
use leadscore::{Activity, ActivityMetadata, ActivityType, Campaign, CustomData, Lead};
use serde_json::json;
use uuid::Uuid;

/// A lead with full contact data, created 30 days ago.
pub fn sample_lead(name: &str) -> Lead {
    let mut custom_data = CustomData::new();
    custom_data.insert("source".into(), json!("referral"));
    custom_data.insert("industry".into(), json!("logistics"));

    Lead {
        id: Uuid::new_v4(),
        name: name.into(),
        email: Some(format!("{}@example.com", name.to_lowercase())),
        phone: Some("+1 555 0100".into()),
        job_title: Some("VP Operations".into()),
        company: Some("Example Freight".into()),
        campaign_id: None,
        custom_data,
        created_at: Utc::now() - Duration::days(30),
    }
}

pub fn sample_campaign(name: &str) -> Campaign {
    Campaign {
        id: Uuid::new_v4(),
        name: name.into(),
        created_at: Utc::now() - Duration::days(90),
    }
}

pub fn email_activity(lead_id: Uuid, days_ago: i64, opened: bool, clicked: bool) -> Activity {
    Activity {
        id: Uuid::new_v4(),
        lead_id,
        activity_type: ActivityType::Email,
        occurred_at: Utc::now() - Duration::days(days_ago),
        metadata: ActivityMetadata {
            opened: Some(opened),
            clicked: Some(clicked),
            ..Default::default()
        },
    }
}

pub fn call_activity(lead_id: Uuid, days_ago: i64, answered: bool) -> Activity {
    Activity {
        id: Uuid::new_v4(),
        lead_id,
        activity_type: ActivityType::Call,
        occurred_at: Utc::now() - Duration::days(days_ago),
        metadata: ActivityMetadata {
            answered: Some(answered),
            ..Default::default()
        },
    }
}
