//! Types for the recommendation engine

use serde::{Deserialize, Serialize};

use crate::domain::department::Department;

/// Static rule voting for a department when its pattern occurs in a page id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryRule {
    /// Substring matched against the page identifier
    pub pattern: &'static str,
    /// Department this rule votes for
    pub department: Department,
    /// Weight before dwell and recency multipliers (1.0 - 5.0)
    pub base_score: f64,
    /// Display label for the matched topic, not used in scoring
    pub category: &'static str,
}

impl CategoryRule {
    pub fn matches(&self, page: &str) -> bool {
        page.contains(self.pattern)
    }
}

/// Confidence level for a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    /// Get confidence level from score using the default thresholds
    pub fn from_score(score: f64) -> Self {
        super::DEFAULT_THRESHOLDS.confidence(score)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        }
    }
}

/// A department suggestion derived from the current history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    /// Winning department
    pub department: Department,
    /// Accumulated score rounded to one decimal place for display
    pub score: String,
    /// Accumulated score at full precision
    pub raw_score: f64,
    /// Bucketed strength of the winning score
    pub confidence: Confidence,
    /// Human-readable justification
    pub reason: String,
}

/// One-decimal display form; halves round away from zero (11.25 -> "11.3").
fn display_score(raw_score: f64) -> String {
    format!("{:.1}", (raw_score * 10.0).round() / 10.0)
}

impl RecommendationResult {
    pub fn new(department: Department, raw_score: f64, confidence: Confidence) -> Self {
        Self {
            department,
            score: display_score(raw_score),
            raw_score,
            confidence,
            reason: super::reason_for(department).to_owned(),
        }
    }
}
