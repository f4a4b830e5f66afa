use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Composite scoring weights for the four factor categories.
///
/// The weights must sum to 1.0. This is an invariant of the current scoring
/// model, not a tunable default. They live in configuration so that a future
/// per-tenant weighting scheme is a drop-in change without touching the
/// scoring math.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Weight for the demographic sub-score (0.0-1.0)
    #[serde(default = "default_demographic_weight")]
    pub demographic: f64,

    /// Weight for the engagement sub-score (0.0-1.0)
    #[serde(default = "default_engagement_weight")]
    pub engagement: f64,

    /// Weight for the behavioral sub-score (0.0-1.0)
    #[serde(default = "default_behavioral_weight")]
    pub behavioral: f64,

    /// Weight for the campaign provenance sub-score (0.0-1.0)
    #[serde(default = "default_campaign_weight")]
    pub campaign: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            demographic: default_demographic_weight(),
            engagement: default_engagement_weight(),
            behavioral: default_behavioral_weight(),
            campaign: default_campaign_weight(),
        }
    }
}

impl ScoringWeights {
    // Pure function: Check if a weight is in valid range
    fn is_valid_weight(weight: f64) -> bool {
        (0.0..=1.0).contains(&weight)
    }

    // Pure function: Validate a single weight with name
    fn validate_weight(weight: f64, name: &str) -> Result<(), String> {
        if Self::is_valid_weight(weight) {
            Ok(())
        } else {
            Err(format!("{} weight must be between 0.0 and 1.0", name))
        }
    }

    /// Validate that weights sum to 1.0 (with small tolerance for floating point)
    pub fn validate(&self) -> Result<(), String> {
        let sum = self.demographic + self.engagement + self.behavioral + self.campaign;
        if (sum - 1.0).abs() > 0.001 {
            return Err(format!(
                "Scoring weights (demographic, engagement, behavioral, campaign) must sum to 1.0, but sum to {:.3}",
                sum
            ));
        }

        for validation in [
            Self::validate_weight(self.demographic, "Demographic"),
            Self::validate_weight(self.engagement, "Engagement"),
            Self::validate_weight(self.behavioral, "Behavioral"),
            Self::validate_weight(self.campaign, "Campaign"),
        ] {
            validation?;
        }

        Ok(())
    }

    /// Normalize weights to ensure they sum to 1.0
    pub fn normalize(&mut self) {
        let sum = self.demographic + self.engagement + self.behavioral + self.campaign;
        if sum > 0.0 && (sum - 1.0).abs() > 0.001 {
            self.demographic /= sum;
            self.engagement /= sum;
            self.behavioral /= sum;
            self.campaign /= sum;
        }
    }
}

// Default weights for the weighted sum model - engagement and recency dominate
fn default_demographic_weight() -> f64 {
    0.20 // contact completeness
}
fn default_engagement_weight() -> f64 {
    0.35 // email/call engagement carries the most signal
}
fn default_behavioral_weight() -> f64 {
    0.30 // responsiveness and recency
}
fn default_campaign_weight() -> f64 {
    0.15 // provenance
}

/// Score boundaries for letter grades, inclusive-lower, checked top-down.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GradeThresholds {
    #[serde(default = "default_grade_a")]
    pub a: u32,
    #[serde(default = "default_grade_b")]
    pub b: u32,
    #[serde(default = "default_grade_c")]
    pub c: u32,
    #[serde(default = "default_grade_d")]
    pub d: u32,
}

impl Default for GradeThresholds {
    fn default() -> Self {
        Self {
            a: default_grade_a(),
            b: default_grade_b(),
            c: default_grade_c(),
            d: default_grade_d(),
        }
    }
}

fn default_grade_a() -> u32 {
    85
}
fn default_grade_b() -> u32 {
    70
}
fn default_grade_c() -> u32 {
    55
}
fn default_grade_d() -> u32 {
    40
}

/// Score boundaries for the Hot/Warm/Cold triage tiers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PriorityThresholds {
    #[serde(default = "default_priority_hot")]
    pub hot: u32,
    #[serde(default = "default_priority_warm")]
    pub warm: u32,
}

impl Default for PriorityThresholds {
    fn default() -> Self {
        Self {
            hot: default_priority_hot(),
            warm: default_priority_warm(),
        }
    }
}

fn default_priority_hot() -> u32 {
    75
}
fn default_priority_warm() -> u32 {
    50
}

/// Inputs to the risk classification.
///
/// High risk requires both staleness and a weak score; Medium fires on either
/// drift or a sub-healthy score. The High condition is evaluated first.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RiskThresholds {
    /// Days of inactivity after which a weak lead is High risk
    #[serde(default = "default_stale_after_days")]
    pub stale_after_days: f64,
    /// Scores below this combine with staleness into High risk
    #[serde(default = "default_at_risk_score")]
    pub at_risk_score: u32,
    /// Days of inactivity that alone push a lead to Medium risk
    #[serde(default = "default_drift_after_days")]
    pub drift_after_days: f64,
    /// Scores below this alone push a lead to Medium risk
    #[serde(default = "default_healthy_score")]
    pub healthy_score: u32,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            stale_after_days: default_stale_after_days(),
            at_risk_score: default_at_risk_score(),
            drift_after_days: default_drift_after_days(),
            healthy_score: default_healthy_score(),
        }
    }
}

fn default_stale_after_days() -> f64 {
    14.0
}
fn default_at_risk_score() -> u32 {
    60
}
fn default_drift_after_days() -> f64 {
    7.0
}
fn default_healthy_score() -> u32 {
    70
}

/// Tuning for batch recalculation sweeps.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Upper bound on leads scored concurrently
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
    /// Per-lead wall-clock budget; a slow read fails that lead, not the sweep
    #[serde(default = "default_lead_timeout_secs")]
    pub lead_timeout_secs: u64,
    /// Bounded retries around the persistence write only
    #[serde(default = "default_persist_retries")]
    pub persist_retries: u32,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_concurrency: default_max_concurrency(),
            lead_timeout_secs: default_lead_timeout_secs(),
            persist_retries: default_persist_retries(),
        }
    }
}

fn default_max_concurrency() -> usize {
    8
}
fn default_lead_timeout_secs() -> u64 {
    30
}
fn default_persist_retries() -> u32 {
    2
}

/// Root configuration, loaded from `.leadscore.toml` if present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeadscoreConfig {
    pub scoring: Option<ScoringWeights>,
    pub grades: Option<GradeThresholds>,
    pub priority: Option<PriorityThresholds>,
    pub risk: Option<RiskThresholds>,
    pub batch: Option<BatchConfig>,
}

/// Cache the configuration
static CONFIG: OnceLock<LeadscoreConfig> = OnceLock::new();
static SCORING_WEIGHTS: OnceLock<ScoringWeights> = OnceLock::new();

/// Pure function to read config file contents
fn read_config_file(path: &Path) -> Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Pure function to parse and validate config from TOML string
#[cfg(test)]
pub(crate) fn parse_and_validate_config(contents: &str) -> Result<LeadscoreConfig, String> {
    parse_and_validate_config_impl(contents)
}

fn parse_and_validate_config_impl(contents: &str) -> Result<LeadscoreConfig, String> {
    let mut config = toml::from_str::<LeadscoreConfig>(contents)
        .map_err(|e| format!("Failed to parse .leadscore.toml: {}", e))?;

    // Validate and normalize scoring weights if present
    if let Some(ref mut scoring) = config.scoring {
        if let Err(e) = scoring.validate() {
            log::warn!("Invalid scoring weights: {}. Normalizing.", e);
            scoring.normalize();
            if scoring.validate().is_err() {
                log::warn!("Scoring weights could not be normalized. Using defaults.");
                config.scoring = Some(ScoringWeights::default());
            }
        }
    }

    Ok(config)
}

/// Pure function to try loading config from a specific path
fn try_load_config_from_path(config_path: &Path) -> Option<LeadscoreConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config_impl(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// Handle file read errors with appropriate logging
fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

fn directory_ancestors_impl(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

pub fn load_config() -> LeadscoreConfig {
    const MAX_TRAVERSAL_DEPTH: usize = 10;

    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            return LeadscoreConfig::default();
        }
    };

    // Search for config file in directory hierarchy
    directory_ancestors_impl(current, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(".leadscore.toml"))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            LeadscoreConfig::default()
        })
}

/// Get the cached configuration
pub fn get_config() -> &'static LeadscoreConfig {
    CONFIG.get_or_init(load_config)
}

/// Get the composite scoring weights (with defaults if not configured)
pub fn get_scoring_weights() -> &'static ScoringWeights {
    SCORING_WEIGHTS.get_or_init(|| get_config().scoring.clone().unwrap_or_default())
}

/// Get grade boundaries (with defaults if not configured)
pub fn get_grade_thresholds() -> GradeThresholds {
    get_config().grades.unwrap_or_default()
}

/// Get priority tier boundaries (with defaults if not configured)
pub fn get_priority_thresholds() -> PriorityThresholds {
    get_config().priority.unwrap_or_default()
}

/// Get risk classification thresholds (with defaults if not configured)
pub fn get_risk_thresholds() -> RiskThresholds {
    get_config().risk.unwrap_or_default()
}

/// Get batch sweep tuning (with defaults if not configured)
pub fn get_batch_config() -> BatchConfig {
    get_config().batch.unwrap_or_default()
}
