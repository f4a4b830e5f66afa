//! Lead scoring pipeline: factors in, composite score and classification out.
//!
//! `build_factors` (in [`factors`]) distills raw lead/activity/campaign data
//! into a [`ScoringFactors`] record; [`score_factors`] turns that record into
//! a [`LeadScore`]. Everything in between is pure and deterministic; the
//! only time-dependent input, `last_activity_days`, is computed during
//! extraction, not inside the scoring math.

pub mod calculation;
pub mod classifier;
pub mod factors;
pub mod recommendations;

use crate::config;
use crate::core::CustomData;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Custom-data key the score snapshot is merged under.
pub const SNAPSHOT_KEY: &str = "lead_score";
/// Custom-data key for the timestamp of the last scoring run.
pub const LAST_SCORED_KEY: &str = "last_scored";

/// Normalized signals about a lead, derived at scoring time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringFactors {
    // Demographic
    pub has_email: bool,
    pub has_phone: bool,
    pub has_job_title: bool,
    pub has_company: bool,
    /// Ratio of filled custom fields to defined custom fields, 0-100.
    pub custom_data_completeness: f64,

    // Engagement
    pub email_opens: u32,
    pub email_clicks: u32,
    pub calls_answered: u32,
    pub calls_attempted: u32,

    // Behavioral
    /// Mean gap between adjacent activities in hours; 0 with fewer than 2.
    pub response_time_hours: f64,
    /// Days since the most recent activity, or since lead creation if none.
    pub last_activity_days: f64,
    pub total_activities: u32,

    // Provenance
    pub campaign_type: String,
    pub lead_source: String,
}

impl Default for ScoringFactors {
    fn default() -> Self {
        Self {
            has_email: false,
            has_phone: false,
            has_job_title: false,
            has_company: false,
            custom_data_completeness: 0.0,
            email_opens: 0,
            email_clicks: 0,
            calls_answered: 0,
            calls_attempted: 0,
            response_time_hours: 0.0,
            last_activity_days: 0.0,
            total_activities: 0,
            campaign_type: "standard".into(),
            lead_source: "unknown".into(),
        }
    }
}

/// Per-category sub-scores, each an integer 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubScores {
    pub demographic: u32,
    pub engagement: u32,
    pub behavioral: u32,
    pub campaign: u32,
}

/// Letter classification derived from the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn label(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

/// Triage tier derived from the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    Hot,
    Warm,
    Cold,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Priority::Hot => "Hot",
            Priority::Warm => "Warm",
            Priority::Cold => "Cold",
        }
    }
}

/// Likelihood-of-loss estimate derived from score and recency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

/// Result of one scoring run over a single lead.
///
/// Ephemeral: each run's snapshot overwrites the previous one in the lead's
/// custom-data bag, never archived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadScore {
    pub total_score: u32,
    pub grade: Grade,
    pub priority: Priority,
    pub risk_level: RiskLevel,
    pub sub_scores: SubScores,
    /// Action suggestions in rule-evaluation order, each rule firing at most
    /// once.
    pub recommendations: Vec<String>,
    pub next_best_action: String,
}

impl LeadScore {
    /// Build the custom-data patch that persists this score onto its lead.
    ///
    /// The patch is merged into the existing bag, so unrelated keys survive.
    pub fn snapshot_patch(&self, scored_at: DateTime<Utc>) -> CustomData {
        let mut patch = CustomData::new();
        patch.insert(SNAPSHOT_KEY.to_string(), json!(self));
        patch.insert(LAST_SCORED_KEY.to_string(), json!(scored_at.to_rfc3339()));
        patch
    }
}

/// Score a factor record into a full [`LeadScore`].
///
/// Pure given fixed configuration: the same factors always produce the same
/// score, classification, and recommendations.
pub fn score_factors(factors: &ScoringFactors) -> LeadScore {
    let sub_scores = calculation::sub_scores(factors);
    let total_score = calculation::compose_total(&sub_scores, config::get_scoring_weights());

    let classification = classifier::classify(
        total_score,
        factors.last_activity_days,
        &config::get_grade_thresholds(),
        &config::get_priority_thresholds(),
        &config::get_risk_thresholds(),
    );

    let recommendations = recommendations::generate(factors, &sub_scores, total_score);
    let next_best_action = recommendations::next_best_action(factors).to_string();

    LeadScore {
        total_score,
        grade: classification.grade,
        priority: classification.priority,
        risk_level: classification.risk_level,
        sub_scores,
        recommendations,
        next_best_action,
    }
}
