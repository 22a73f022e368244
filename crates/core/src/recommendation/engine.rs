//! Recommendation engine implementation

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::visit::VisitRecord;

use super::rules::match_rule;
use super::scoring::{recency_multiplier, time_multiplier, DepartmentScores, ScoringThresholds};
use super::types::RecommendationResult;

/// Stateless scorer over a visit history. Holds only its thresholds; every
/// call recomputes from the history it is given.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedRecommendation {
    thresholds: ScoringThresholds,
}

impl RuleBasedRecommendation {
    /// Create with default thresholds
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom thresholds
    pub fn with_thresholds(thresholds: ScoringThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> ScoringThresholds {
        self.thresholds
    }

    /// Recommend a department, weighting recency against the current time.
    pub fn recommend(&self, history: &[VisitRecord]) -> Option<RecommendationResult> {
        self.recommend_at(history, Utc::now())
    }

    /// Recommend a department as of `now`.
    pub fn recommend_at(
        &self,
        history: &[VisitRecord],
        now: DateTime<Utc>,
    ) -> Option<RecommendationResult> {
        if history.is_empty() {
            debug!(event_name = "recommendation.skipped", reason = "empty_history", "no visits to score");
            return None;
        }

        let scores = score_history(history, now);
        let Some((department, score)) = scores.ranked().first().copied() else {
            debug!(
                event_name = "recommendation.skipped",
                reason = "no_matching_rules",
                visits = history.len(),
                "no visit matched a category rule"
            );
            return None;
        };

        let Some(confidence) = self.thresholds.assess(score) else {
            debug!(
                event_name = "recommendation.skipped",
                reason = "below_significance_floor",
                department = department.as_str(),
                score,
                floor = self.thresholds.significance_floor,
                "top department did not clear the significance floor"
            );
            return None;
        };

        debug!(
            event_name = "recommendation.issued",
            department = department.as_str(),
            score,
            confidence = confidence.as_str(),
            visits = history.len(),
            "department recommendation issued"
        );
        Some(RecommendationResult::new(department, score, confidence))
    }
}

/// Accumulate each matching visit's weighted score into its department.
pub(crate) fn score_history(history: &[VisitRecord], now: DateTime<Utc>) -> DepartmentScores {
    let mut scores = DepartmentScores::default();

    for visit in history {
        let Some(rule) = match_rule(visit.page()) else {
            debug!(event_name = "recommendation.visit.unmatched", page = visit.page());
            continue;
        };

        let score = rule.base_score
            * time_multiplier(visit.time_spent())
            * recency_multiplier(visit.timestamp(), now);
        scores.add(rule.department, score);
    }

    scores
}

/// Recommend with default thresholds at the current time.
pub fn recommend(history: &[VisitRecord]) -> Option<RecommendationResult> {
    RuleBasedRecommendation::new().recommend(history)
}

/// Recommend with default thresholds as of `now`.
pub fn recommend_at(history: &[VisitRecord], now: DateTime<Utc>) -> Option<RecommendationResult> {
    RuleBasedRecommendation::new().recommend_at(history, now)
}
