//! Scoring multipliers and thresholds for department recommendations

use chrono::{DateTime, Duration, Utc};

use crate::domain::department::Department;

use super::types::Confidence;

/// Score thresholds for issuing and classifying a recommendation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringThresholds {
    /// Winning scores below this produce no recommendation (default: 3.0)
    pub significance_floor: f64,
    /// Lower bound of medium confidence (default: 5.0)
    pub medium: f64,
    /// Lower bound of high confidence (default: 8.0)
    pub high: f64,
}

impl Default for ScoringThresholds {
    fn default() -> Self {
        super::DEFAULT_THRESHOLDS
    }
}

impl ScoringThresholds {
    pub fn confidence(&self, score: f64) -> Confidence {
        if score >= self.high {
            Confidence::High
        } else if score >= self.medium {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }

    /// Confidence for a winning score, or `None` below the significance floor.
    pub fn assess(&self, score: f64) -> Option<Confidence> {
        (score >= self.significance_floor).then(|| self.confidence(score))
    }
}

/// Engagement weight from dwell seconds.
pub fn time_multiplier(time_spent: u32) -> f64 {
    match time_spent {
        0..=29 => 1.0,
        30..=59 => 1.5,
        _ => 2.0,
    }
}

/// Decay weight from how long ago a visit ended. Visits stamped after `now`
/// count as just finished.
pub fn recency_multiplier(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let elapsed = (now - timestamp).max(Duration::zero());

    if elapsed < Duration::hours(1) {
        1.5
    } else if elapsed < Duration::hours(24) {
        1.2
    } else {
        1.0
    }
}

/// Per-department score accumulator with one slot per `Department`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DepartmentScores {
    totals: [f64; Department::COUNT],
}

impl DepartmentScores {
    pub fn add(&mut self, department: Department, score: f64) {
        self.totals[department.index()] += score;
    }

    pub fn get(&self, department: Department) -> f64 {
        self.totals[department.index()]
    }

    /// Departments with a positive total, highest first. Equal totals keep
    /// `Department::ALL` order.
    pub fn ranked(&self) -> Vec<(Department, f64)> {
        let mut ranked: Vec<(Department, f64)> = Department::ALL
            .into_iter()
            .map(|department| (department, self.get(department)))
            .filter(|(_, score)| *score > 0.0)
            .collect();

        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked
    }
}
