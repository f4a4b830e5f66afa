//! Rule-derived action suggestions.
//!
//! `generate` walks a fixed, ordered rule list; each rule is independent and
//! fires at most once, so the output is deduplicated by construction and its
//! order is the rule order. `next_best_action` is a separate first-match
//! decision list, not an optimizer.

use crate::scoring::{ScoringFactors, SubScores};

pub const REC_OBTAIN_EMAIL: &str = "Obtain email address for better communication";
pub const REC_GET_PHONE: &str = "Get phone number for direct contact";
pub const REC_FOLLOW_UP: &str = "Follow up immediately - lead is getting cold";
pub const REC_VARY_CALL_TIMES: &str = "Try different calling times or email first";
pub const REC_IMPROVE_SUBJECTS: &str = "Improve email subject lines";
pub const REC_GATHER_INFO: &str = "Gather more qualifying information";
pub const REC_PERSONALIZE: &str = "Increase engagement with personalized content";
pub const REC_PRIORITIZE: &str = "High-quality lead - prioritize for immediate contact";

pub const ACTION_REENGAGE: &str = "Re-engagement campaign";
pub const ACTION_FOLLOW_UP_CALL: &str = "Schedule follow-up call";
pub const ACTION_PERSONALIZED_EMAIL: &str = "Send personalized email";
pub const ACTION_PHONE_CALL: &str = "Make phone call";
pub const ACTION_INITIAL_EMAIL: &str = "Send initial email";

// Rule thresholds
const COLD_AFTER_DAYS: f64 = 7.0;
const THIN_CUSTOM_DATA: f64 = 50.0;
const LOW_ENGAGEMENT: u32 = 30;
const HIGH_QUALITY: u32 = 80;
const REENGAGE_AFTER_DAYS: f64 = 14.0;

/// Evaluate the recommendation rules against a scored lead.
pub fn generate(factors: &ScoringFactors, sub_scores: &SubScores, total_score: u32) -> Vec<String> {
    let mut recommendations = Vec::new();

    if !factors.has_email {
        recommendations.push(REC_OBTAIN_EMAIL.to_string());
    }
    if !factors.has_phone {
        recommendations.push(REC_GET_PHONE.to_string());
    }
    if factors.last_activity_days > COLD_AFTER_DAYS {
        recommendations.push(REC_FOLLOW_UP.to_string());
    }
    if factors.calls_attempted > 0 && factors.calls_answered == 0 {
        recommendations.push(REC_VARY_CALL_TIMES.to_string());
    }
    if factors.email_opens == 0 && factors.email_clicks > 0 {
        recommendations.push(REC_IMPROVE_SUBJECTS.to_string());
    }
    if factors.custom_data_completeness < THIN_CUSTOM_DATA {
        recommendations.push(REC_GATHER_INFO.to_string());
    }
    if sub_scores.engagement < LOW_ENGAGEMENT {
        recommendations.push(REC_PERSONALIZE.to_string());
    }
    if total_score >= HIGH_QUALITY {
        recommendations.push(REC_PRIORITIZE.to_string());
    }

    recommendations
}

/// First matching rule wins; the order is fixed, not ranked by impact.
pub fn next_best_action(factors: &ScoringFactors) -> &'static str {
    if factors.last_activity_days > REENGAGE_AFTER_DAYS {
        ACTION_REENGAGE
    } else if factors.calls_answered > 0 {
        ACTION_FOLLOW_UP_CALL
    } else if factors.email_opens > 0 {
        ACTION_PERSONALIZED_EMAIL
    } else if factors.has_phone {
        ACTION_PHONE_CALL
    } else {
        ACTION_INITIAL_EMAIL
    }
}
