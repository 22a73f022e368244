//! Joins a recommendation with the department metadata needed to show it.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::directory::DepartmentDirectory;
use crate::recommendation::RecommendationResult;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RecommendationCard {
    #[serde(flatten)]
    pub result: RecommendationResult,
    pub name: String,
    pub phone: String,
    pub description: String,
    pub hours: String,
    /// Whether the phone line is staffed at the time the card was resolved.
    pub phone_active: bool,
}

/// Resolve a recommendation for display. A department missing from the
/// directory is treated the same as having no recommendation.
pub fn resolve_card(
    result: RecommendationResult,
    directory: &impl DepartmentDirectory,
    local_now: NaiveDateTime,
) -> Option<RecommendationCard> {
    let record = directory.lookup(result.department)?;

    Some(RecommendationCard {
        name: record.name.clone(),
        phone: record.phone.clone(),
        description: record.description.clone(),
        hours: record.hours.label(),
        phone_active: record.hours.is_open_at(local_now),
        result,
    })
}
