// Pure functions for sub-score and composite calculation. No I/O, no side
// effects; this is the unit the property tests lean on.

use crate::config::ScoringWeights;
use crate::scoring::{ScoringFactors, SubScores};

// Demographic points per present contact field, plus the share a fully
// filled custom-data bag contributes.
const EMAIL_POINTS: f64 = 15.0;
const PHONE_POINTS: f64 = 20.0;
const JOB_TITLE_POINTS: f64 = 10.0;
const COMPANY_POINTS: f64 = 15.0;
const CUSTOM_DATA_POINTS: f64 = 40.0;

// Engagement rate multipliers and per-channel caps.
//
// NOTE: open_rate divides opens by clicks and click_rate divides clicks by
// opens, inverted from the natural reading. Historical scores were produced
// with this arithmetic; do not flip the ratios without product sign-off.
const OPEN_RATE_MULTIPLIER: f64 = 2.0;
const CLICK_RATE_MULTIPLIER: f64 = 3.0;
const ANSWER_RATE_MULTIPLIER: f64 = 4.0;
const RATE_SCALE: f64 = 20.0;
const OPEN_CAP: f64 = 30.0;
const CLICK_CAP: f64 = 35.0;
const ANSWER_CAP: f64 = 35.0;

// Behavioral consistency bonus: active lead touched within the last week.
const CONSISTENCY_BONUS: f64 = 20.0;
const CONSISTENCY_WINDOW_DAYS: f64 = 7.0;

// Campaign sub-score baseline before provenance bonuses.
const CAMPAIGN_BASE: f64 = 50.0;

/// Demographic sub-score: contact completeness, 0-100.
pub fn demographic_score(factors: &ScoringFactors) -> f64 {
    let mut score = 0.0;
    if factors.has_email {
        score += EMAIL_POINTS;
    }
    if factors.has_phone {
        score += PHONE_POINTS;
    }
    if factors.has_job_title {
        score += JOB_TITLE_POINTS;
    }
    if factors.has_company {
        score += COMPANY_POINTS;
    }
    score += (factors.custom_data_completeness / 100.0) * CUSTOM_DATA_POINTS;
    score.clamp(0.0, 100.0)
}

/// Engagement sub-score: email and call responsiveness, 0-100.
///
/// The rates are ratios, not percentages, and are not bounded to 1.0 by
/// construction; the per-channel caps keep the contribution bounded.
pub fn engagement_score(factors: &ScoringFactors) -> f64 {
    let open_rate = if factors.email_clicks > 0 {
        factors.email_opens as f64 / factors.email_clicks as f64
    } else {
        0.0
    };
    let click_rate = if factors.email_opens > 0 {
        factors.email_clicks as f64 / factors.email_opens as f64
    } else {
        0.0
    };
    let answer_rate = if factors.calls_attempted > 0 {
        factors.calls_answered as f64 / factors.calls_attempted as f64
    } else {
        0.0
    };

    let score = (open_rate * OPEN_RATE_MULTIPLIER * RATE_SCALE).min(OPEN_CAP)
        + (click_rate * CLICK_RATE_MULTIPLIER * RATE_SCALE).min(CLICK_CAP)
        + (answer_rate * ANSWER_RATE_MULTIPLIER * RATE_SCALE).min(ANSWER_CAP);
    score.clamp(0.0, 100.0)
}

/// Behavioral sub-score: responsiveness, recency, and volume, 0-100.
pub fn behavioral_score(factors: &ScoringFactors) -> f64 {
    let mut score = response_time_points(factors.response_time_hours)
        + recency_points(factors.last_activity_days)
        + volume_points(factors.total_activities);

    if factors.total_activities > 0 && factors.last_activity_days <= CONSISTENCY_WINDOW_DAYS {
        score += CONSISTENCY_BONUS;
    }

    score.clamp(0.0, 100.0)
}

/// Single best-matching response-time bucket.
///
/// A zero mean gap means fewer than 2 activities exist, so there is no
/// responsiveness signal; it scores nothing rather than falling into the
/// fastest bucket.
fn response_time_points(hours: f64) -> f64 {
    if hours <= 0.0 {
        0.0
    } else if hours <= 1.0 {
        30.0
    } else if hours <= 4.0 {
        25.0
    } else if hours <= 24.0 {
        15.0
    } else if hours <= 72.0 {
        10.0
    } else {
        5.0
    }
}

/// Single best-matching recency bucket.
fn recency_points(days: f64) -> f64 {
    if days <= 1.0 {
        25.0
    } else if days <= 3.0 {
        20.0
    } else if days <= 7.0 {
        15.0
    } else if days <= 14.0 {
        10.0
    } else if days <= 30.0 {
        5.0
    } else {
        0.0
    }
}

/// Single best-matching activity-volume bucket.
fn volume_points(total_activities: u32) -> f64 {
    if total_activities >= 10 {
        25.0
    } else if total_activities >= 5 {
        20.0
    } else if total_activities >= 3 {
        15.0
    } else if total_activities >= 1 {
        10.0
    } else {
        0.0
    }
}

/// Campaign sub-score: provenance quality, 0-100.
pub fn campaign_score(factors: &ScoringFactors) -> f64 {
    let score = CAMPAIGN_BASE
        + campaign_type_bonus(&factors.campaign_type)
        + lead_source_bonus(&factors.lead_source);
    score.clamp(0.0, 100.0)
}

fn campaign_type_bonus(campaign_type: &str) -> f64 {
    match campaign_type.to_lowercase().as_str() {
        "premium" | "enterprise" => 30.0,
        "standard" => 20.0,
        "basic" => 10.0,
        _ => 0.0,
    }
}

fn lead_source_bonus(lead_source: &str) -> f64 {
    match lead_source.to_lowercase().as_str() {
        "referral" | "inbound" => 20.0,
        "linkedin" | "social" => 15.0,
        "cold_email" => 10.0,
        "cold_call" => 5.0,
        _ => 0.0,
    }
}

/// Compute all four sub-scores, rounded to integers.
pub fn sub_scores(factors: &ScoringFactors) -> SubScores {
    SubScores {
        demographic: demographic_score(factors).round() as u32,
        engagement: engagement_score(factors).round() as u32,
        behavioral: behavioral_score(factors).round() as u32,
        campaign: campaign_score(factors).round() as u32,
    }
}

/// Weighted composite of the rounded sub-scores, rounded to an integer 0-100.
pub fn compose_total(sub_scores: &SubScores, weights: &ScoringWeights) -> u32 {
    let total = sub_scores.demographic as f64 * weights.demographic
        + sub_scores.engagement as f64 * weights.engagement
        + sub_scores.behavioral as f64 * weights.behavioral
        + sub_scores.campaign as f64 * weights.campaign;
    total.round().clamp(0.0, 100.0) as u32
}
