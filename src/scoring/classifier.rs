//! Threshold classification of a composite score into grade, priority, and
//! risk. Pure functions of `(total_score, last_activity_days)` plus the
//! configured thresholds.

use crate::config::{GradeThresholds, PriorityThresholds, RiskThresholds};
use crate::scoring::{Grade, Priority, RiskLevel};
use serde::{Deserialize, Serialize};

/// Combined classification for one scoring run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub grade: Grade,
    pub priority: Priority,
    pub risk_level: RiskLevel,
}

/// Letter grade, boundaries inclusive-lower and checked top-down, so ties
/// resolve to the higher grade.
pub fn grade_for(total_score: u32, thresholds: &GradeThresholds) -> Grade {
    if total_score >= thresholds.a {
        Grade::A
    } else if total_score >= thresholds.b {
        Grade::B
    } else if total_score >= thresholds.c {
        Grade::C
    } else if total_score >= thresholds.d {
        Grade::D
    } else {
        Grade::F
    }
}

/// Hot/Warm/Cold triage tier.
pub fn priority_for(total_score: u32, thresholds: &PriorityThresholds) -> Priority {
    if total_score >= thresholds.hot {
        Priority::Hot
    } else if total_score >= thresholds.warm {
        Priority::Warm
    } else {
        Priority::Cold
    }
}

/// Risk level from score and recency. The High condition is checked first and
/// short-circuits; a stale lead with a strong score is only Medium.
pub fn risk_for(total_score: u32, last_activity_days: f64, thresholds: &RiskThresholds) -> RiskLevel {
    if last_activity_days > thresholds.stale_after_days && total_score < thresholds.at_risk_score {
        RiskLevel::High
    } else if last_activity_days > thresholds.drift_after_days
        || total_score < thresholds.healthy_score
    {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Classify a composite score on all three axes.
pub fn classify(
    total_score: u32,
    last_activity_days: f64,
    grades: &GradeThresholds,
    priorities: &PriorityThresholds,
    risks: &RiskThresholds,
) -> Classification {
    Classification {
        grade: grade_for(total_score, grades),
        priority: priority_for(total_score, priorities),
        risk_level: risk_for(total_score, last_activity_days, risks),
    }
}
