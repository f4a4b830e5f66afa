//! Core domain types shared across the scoring pipeline.
//!
//! These mirror the shape of the collaborating lead store: structured contact
//! fields, a free-form custom key/value bag, and timestamped activity records
//! with an opaque metadata bag. The metadata bag is modeled as a typed
//! optional-field struct with explicit flag accessors so that
//! missing-data-degrades-to-default behavior is visible at the call site.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Free-form custom field bag attached to leads and activity metadata.
pub type CustomData = serde_json::Map<String, serde_json::Value>;

/// A sales prospect record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub job_title: Option<String>,
    pub company: Option<String>,
    /// Campaign the lead was sourced through, if any.
    pub campaign_id: Option<Uuid>,
    /// Tenant-defined custom fields. Also receives the scoring snapshot.
    #[serde(default)]
    pub custom_data: CustomData,
    pub created_at: DateTime<Utc>,
}

impl Lead {
    pub fn has_email(&self) -> bool {
        is_present(&self.email)
    }

    pub fn has_phone(&self) -> bool {
        is_present(&self.phone)
    }

    pub fn has_job_title(&self) -> bool {
        is_present(&self.job_title)
    }

    pub fn has_company(&self) -> bool {
        is_present(&self.company)
    }

    /// Look up a custom field value by key.
    pub fn custom_field(&self, key: &str) -> Option<&serde_json::Value> {
        self.custom_data.get(key)
    }
}

/// A field counts as present when it is set and non-empty.
fn is_present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.is_empty())
}

/// A marketing campaign a lead can be associated with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    pub id: Uuid,
    /// Campaign name, matched case-insensitively against the provenance
    /// vocabulary during scoring.
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Type tag for an interaction record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityType {
    Call,
    Email,
    Meeting,
    Note,
    StatusChange,
}

/// A timestamped interaction attached to a lead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: Uuid,
    pub lead_id: Uuid,
    pub activity_type: ActivityType,
    pub occurred_at: DateTime<Utc>,
    #[serde(default)]
    pub metadata: ActivityMetadata,
}

/// Outcome flags recorded on an activity.
///
/// The source system stored these in an untyped bag; unknown keys are kept in
/// `extra` so round-tripping a record never loses data. An absent flag reads
/// as `false`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opened: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clicked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answered: Option<bool>,
    #[serde(flatten)]
    pub extra: CustomData,
}

impl ActivityMetadata {
    /// Whether an email activity was opened.
    pub fn opened_flag(&self) -> bool {
        self.opened.unwrap_or(false)
    }

    /// Whether an email activity was clicked through.
    pub fn clicked_flag(&self) -> bool {
        self.clicked.unwrap_or(false)
    }

    /// Whether a call activity was answered.
    pub fn answered_flag(&self) -> bool {
        self.answered.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lead_with_contact(email: Option<&str>, phone: Option<&str>) -> Lead {
        Lead {
            id: Uuid::new_v4(),
            name: "Ada Lovelace".into(),
            email: email.map(String::from),
            phone: phone.map(String::from),
            job_title: None,
            company: None,
            campaign_id: None,
            custom_data: CustomData::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_string_fields_are_not_present() {
        let lead = lead_with_contact(Some(""), Some("+1 555 0100"));
        assert!(!lead.has_email());
        assert!(lead.has_phone());
        assert!(!lead.has_job_title());
        assert!(!lead.has_company());
    }

    #[test]
    fn metadata_flags_default_to_false() {
        let meta = ActivityMetadata::default();
        assert!(!meta.opened_flag());
        assert!(!meta.clicked_flag());
        assert!(!meta.answered_flag());
    }

    #[test]
    fn metadata_keeps_unknown_keys() {
        let meta: ActivityMetadata = serde_json::from_value(json!({
            "opened": true,
            "duration_secs": 42,
        }))
        .unwrap();
        assert!(meta.opened_flag());
        assert_eq!(meta.extra.get("duration_secs"), Some(&json!(42)));
    }

    #[test]
    fn activity_type_serializes_screaming_snake() {
        let tag = serde_json::to_string(&ActivityType::StatusChange).unwrap();
        assert_eq!(tag, "\"STATUS_CHANGE\"");
    }
}
