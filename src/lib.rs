// Export modules for library usage
pub mod config;
pub mod core;
pub mod engine;
pub mod errors;
pub mod scoring;
pub mod store;

// Re-export commonly used types
pub use crate::core::{Activity, ActivityMetadata, ActivityType, Campaign, CustomData, Lead};

pub use crate::engine::{
    batch::{BatchFailure, BatchReport},
    LeadScoringEngine,
};

pub use crate::errors::ScoreError;

pub use crate::scoring::{
    classifier::{classify, Classification},
    factors::build_factors,
    score_factors, Grade, LeadScore, Priority, RiskLevel, ScoringFactors, SubScores,
};

pub use crate::store::{memory::InMemoryStore, ActivityStore, LeadStore, StoreError};
