//! Factor extraction: distill a lead, its activity history, and its campaign
//! into a [`ScoringFactors`] record.
//!
//! This half of the extractor is pure; the engine owns the store fetches and
//! hands the results in. Missing related data never fails extraction, it
//! degrades to defaults: no campaign reads as "standard", no source custom
//! field as "unknown", no activities as zero engagement.

use crate::core::{Activity, ActivityType, Campaign, Lead};
use crate::scoring::ScoringFactors;
use chrono::{DateTime, Utc};

/// Custom-data key holding the lead's acquisition source.
pub const SOURCE_KEY: &str = "source";

const SECS_PER_HOUR: f64 = 3600.0;
const SECS_PER_DAY: f64 = 86_400.0;

/// Build the scoring factors for one lead.
///
/// `activities` must be ordered newest-first, as the activity store returns
/// them. `now` is threaded in rather than read from the clock so scoring runs
/// are reproducible.
pub fn build_factors(
    lead: &Lead,
    activities: &[Activity],
    campaign: Option<&Campaign>,
    now: DateTime<Utc>,
) -> ScoringFactors {
    let engagement = EngagementCounts::tally(activities);

    ScoringFactors {
        has_email: lead.has_email(),
        has_phone: lead.has_phone(),
        has_job_title: lead.has_job_title(),
        has_company: lead.has_company(),
        custom_data_completeness: custom_data_completeness(lead),
        email_opens: engagement.opens,
        email_clicks: engagement.clicks,
        calls_answered: engagement.answered,
        calls_attempted: engagement.attempted,
        response_time_hours: mean_gap_hours(activities),
        last_activity_days: last_activity_days(lead, activities, now),
        total_activities: activities.len() as u32,
        campaign_type: campaign
            .map(|c| c.name.clone())
            .unwrap_or_else(|| "standard".to_string()),
        lead_source: lead_source(lead),
    }
}

#[derive(Default)]
struct EngagementCounts {
    opens: u32,
    clicks: u32,
    answered: u32,
    attempted: u32,
}

impl EngagementCounts {
    fn tally(activities: &[Activity]) -> Self {
        let mut counts = Self::default();
        for activity in activities {
            match activity.activity_type {
                ActivityType::Email => {
                    if activity.metadata.opened_flag() {
                        counts.opens += 1;
                    }
                    if activity.metadata.clicked_flag() {
                        counts.clicks += 1;
                    }
                }
                ActivityType::Call => {
                    counts.attempted += 1;
                    if activity.metadata.answered_flag() {
                        counts.answered += 1;
                    }
                }
                _ => {}
            }
        }
        counts
    }
}

/// Filled custom fields over defined custom fields, as a 0-100 percentage.
/// A lead with no custom fields scores 0, not 100.
fn custom_data_completeness(lead: &Lead) -> f64 {
    let total = lead.custom_data.len();
    if total == 0 {
        return 0.0;
    }
    let filled = lead
        .custom_data
        .values()
        .filter(|value| is_filled(value))
        .count();
    filled as f64 / total as f64 * 100.0
}

fn is_filled(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// Mean gap between adjacent activities in hours, 0 with fewer than 2.
fn mean_gap_hours(activities: &[Activity]) -> f64 {
    if activities.len() < 2 {
        return 0.0;
    }
    let total_secs: f64 = activities
        .windows(2)
        .map(|pair| {
            (pair[0].occurred_at - pair[1].occurred_at)
                .num_seconds()
                .unsigned_abs() as f64
        })
        .sum();
    total_secs / SECS_PER_HOUR / (activities.len() - 1) as f64
}

/// Days since the newest activity, or since lead creation with no history.
/// Clamped at 0 against clock skew.
fn last_activity_days(lead: &Lead, activities: &[Activity], now: DateTime<Utc>) -> f64 {
    let reference = activities
        .first()
        .map(|activity| activity.occurred_at)
        .unwrap_or(lead.created_at);
    ((now - reference).num_seconds() as f64 / SECS_PER_DAY).max(0.0)
}

fn lead_source(lead: &Lead) -> String {
    lead.custom_field(SOURCE_KEY)
        .and_then(|value| value.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ActivityMetadata, CustomData};
    use chrono::Duration;
    use serde_json::json;
    use uuid::Uuid;

    fn lead_at(created_at: DateTime<Utc>) -> Lead {
        Lead {
            id: Uuid::new_v4(),
            name: "Marie Curie".into(),
            email: Some("marie@sorbonne.fr".into()),
            phone: None,
            job_title: Some("Researcher".into()),
            company: None,
            campaign_id: None,
            custom_data: CustomData::new(),
            created_at,
        }
    }

    fn activity(
        lead_id: Uuid,
        activity_type: ActivityType,
        occurred_at: DateTime<Utc>,
        metadata: ActivityMetadata,
    ) -> Activity {
        Activity {
            id: Uuid::new_v4(),
            lead_id,
            activity_type,
            occurred_at,
            metadata,
        }
    }

    #[test]
    fn test_no_history_degrades_to_defaults() {
        let now = Utc::now();
        let lead = lead_at(now - Duration::days(10));
        let factors = build_factors(&lead, &[], None, now);

        assert_eq!(factors.total_activities, 0);
        assert_eq!(factors.response_time_hours, 0.0);
        assert!((factors.last_activity_days - 10.0).abs() < 0.01);
        assert_eq!(factors.campaign_type, "standard");
        assert_eq!(factors.lead_source, "unknown");
        assert_eq!(factors.custom_data_completeness, 0.0);
    }

    #[test]
    fn test_engagement_partition_by_type_and_flags() {
        let now = Utc::now();
        let lead = lead_at(now - Duration::days(30));
        let opened = ActivityMetadata {
            opened: Some(true),
            ..Default::default()
        };
        let opened_and_clicked = ActivityMetadata {
            opened: Some(true),
            clicked: Some(true),
            ..Default::default()
        };
        let answered = ActivityMetadata {
            answered: Some(true),
            ..Default::default()
        };

        let activities = vec![
            activity(lead.id, ActivityType::Email, now, opened_and_clicked),
            activity(
                lead.id,
                ActivityType::Call,
                now - Duration::hours(2),
                answered,
            ),
            activity(
                lead.id,
                ActivityType::Email,
                now - Duration::hours(4),
                opened,
            ),
            activity(
                lead.id,
                ActivityType::Call,
                now - Duration::hours(6),
                ActivityMetadata::default(),
            ),
            // Notes never count toward engagement
            activity(
                lead.id,
                ActivityType::Note,
                now - Duration::hours(8),
                ActivityMetadata::default(),
            ),
        ];

        let factors = build_factors(&lead, &activities, None, now);
        assert_eq!(factors.email_opens, 2);
        assert_eq!(factors.email_clicks, 1);
        assert_eq!(factors.calls_attempted, 2);
        assert_eq!(factors.calls_answered, 1);
        assert_eq!(factors.total_activities, 5);
        // Four adjacent 2h gaps
        assert!((factors.response_time_hours - 2.0).abs() < 1e-9);
        assert_eq!(factors.last_activity_days, 0.0);
    }

    #[test]
    fn test_single_activity_has_no_response_time() {
        let now = Utc::now();
        let lead = lead_at(now - Duration::days(3));
        let activities = vec![activity(
            lead.id,
            ActivityType::Call,
            now - Duration::days(2),
            ActivityMetadata::default(),
        )];

        let factors = build_factors(&lead, &activities, None, now);
        assert_eq!(factors.response_time_hours, 0.0);
        assert!((factors.last_activity_days - 2.0).abs() < 0.01);
    }

    #[test]
    fn test_completeness_counts_filled_values_only() {
        let now = Utc::now();
        let mut lead = lead_at(now);
        lead.custom_data.insert("source".into(), json!("referral"));
        lead.custom_data.insert("budget".into(), json!(25_000));
        lead.custom_data.insert("notes".into(), json!(""));
        lead.custom_data.insert("region".into(), json!(null));

        let factors = build_factors(&lead, &[], None, now);
        assert_eq!(factors.custom_data_completeness, 50.0);
        assert_eq!(factors.lead_source, "referral");
    }

    #[test]
    fn test_campaign_name_becomes_campaign_type() {
        let now = Utc::now();
        let lead = lead_at(now);
        let campaign = Campaign {
            id: Uuid::new_v4(),
            name: "Enterprise".into(),
            created_at: now,
        };
        let factors = build_factors(&lead, &[], Some(&campaign), now);
        assert_eq!(factors.campaign_type, "Enterprise");
    }

    #[test]
    fn test_future_timestamps_clamp_to_zero_days() {
        let now = Utc::now();
        let lead = lead_at(now + Duration::days(1));
        let factors = build_factors(&lead, &[], None, now);
        assert_eq!(factors.last_activity_days, 0.0);
    }

    #[test]
    fn test_non_string_source_degrades_to_unknown() {
        let now = Utc::now();
        let mut lead = lead_at(now);
        lead.custom_data.insert("source".into(), json!(42));
        let factors = build_factors(&lead, &[], None, now);
        assert_eq!(factors.lead_source, "unknown");
    }
}
