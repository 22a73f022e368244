//! Rule-based department recommendation
//!
//! Scores a session's page-visit history against a fixed table of category
//! rules and suggests at most one department, weighted by dwell time and
//! recency.

mod engine;
mod rules;
mod scoring;
mod types;

pub use engine::{recommend, recommend_at, RuleBasedRecommendation};
pub use rules::{match_rule, reason_for, CATEGORY_RULES, GENERIC_REASON};
pub use scoring::{recency_multiplier, time_multiplier, DepartmentScores, ScoringThresholds};
pub use types::*;

/// Minimum winning score below which no recommendation is issued.
pub const SIGNIFICANCE_FLOOR: f64 = 3.0;

/// Scores at or above this are reported with medium confidence.
pub const MEDIUM_CONFIDENCE_SCORE: f64 = 5.0;

/// Scores at or above this are reported with high confidence.
pub const HIGH_CONFIDENCE_SCORE: f64 = 8.0;

/// Default thresholds
pub const DEFAULT_THRESHOLDS: ScoringThresholds = ScoringThresholds {
    significance_floor: SIGNIFICANCE_FLOOR,
    medium: MEDIUM_CONFIDENCE_SCORE,
    high: HIGH_CONFIDENCE_SCORE,
};
