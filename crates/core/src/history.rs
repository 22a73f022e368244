//! Append-only record of the pages a visitor has left during a session.

use crate::domain::visit::VisitRecord;
use crate::errors::{ApplicationError, DomainError};

/// Ordered session history. Records are appended in chronological order and
/// never reordered, mutated, or removed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VisitHistory {
    records: Vec<VisitRecord>,
}

impl VisitHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a history by appending each record in turn.
    pub fn from_records(
        records: impl IntoIterator<Item = VisitRecord>,
    ) -> Result<Self, DomainError> {
        let mut history = Self::new();
        for record in records {
            history.append(record)?;
        }
        Ok(history)
    }

    /// Parse a JSON array of visit records and validate their ordering. A
    /// payload that does not decode is an input failure; a decoded history
    /// out of order is a domain failure.
    pub fn from_json(raw: &str) -> Result<Self, ApplicationError> {
        let records: Vec<VisitRecord> = serde_json::from_str(raw).map_err(|error| {
            ApplicationError::Input(format!("visit history is not valid JSON: {error}"))
        })?;
        Ok(Self::from_records(records)?)
    }

    /// Append a completed visit. A record that ends before the previous one
    /// is rejected; equal timestamps are allowed.
    pub fn append(&mut self, record: VisitRecord) -> Result<(), DomainError> {
        if let Some(previous) = self.records.last() {
            if record.timestamp() < previous.timestamp() {
                return Err(DomainError::NonChronologicalVisit {
                    page: record.page().to_owned(),
                    timestamp: record.timestamp(),
                    previous: previous.timestamp(),
                });
            }
        }

        self.records.push(record);
        Ok(())
    }

    pub fn all(&self) -> &[VisitRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::VisitHistory;
    use crate::domain::visit::VisitRecord;
    use crate::errors::{ApplicationError, DomainError};

    #[test]
    fn append_preserves_insertion_order() {
        let start = Utc::now() - Duration::minutes(10);
        let mut history = VisitHistory::new();
        history.append(VisitRecord::new("pricing", 20, start)).expect("first");
        history.append(VisitRecord::new("faq", 5, start + Duration::minutes(1))).expect("second");
        history.append(VisitRecord::new("contact", 5, start + Duration::minutes(1))).expect("third");

        let pages: Vec<_> = history.all().iter().map(VisitRecord::page).collect();
        assert_eq!(pages, vec!["pricing", "faq", "contact"]);
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn append_rejects_out_of_order_visit() {
        let now = Utc::now();
        let mut history = VisitHistory::new();
        history.append(VisitRecord::new("pricing", 20, now)).expect("first");

        let error = history
            .append(VisitRecord::new("billing", 20, now - Duration::seconds(1)))
            .expect_err("earlier visit must be rejected");

        assert!(matches!(error, DomainError::NonChronologicalVisit { ref page, .. } if page == "billing"));
        assert_eq!(history.len(), 1, "rejected record must not be stored");
    }

    #[test]
    fn from_json_validates_ordering() {
        let raw = r#"[
            {"page":"pricing","time_spent":45,"timestamp":1700000060000},
            {"page":"faq","time_spent":5,"timestamp":1700000000000}
        ]"#;

        assert!(matches!(
            VisitHistory::from_json(raw),
            Err(ApplicationError::Domain(DomainError::NonChronologicalVisit { .. }))
        ));
    }

    #[test]
    fn from_json_reports_malformed_payload() {
        let error = VisitHistory::from_json("{not json").expect_err("malformed json");
        assert_eq!(error.error_class(), "input");
        assert!(matches!(error, ApplicationError::Input(ref message) if message.contains("JSON")));
    }

    #[test]
    fn new_history_is_empty() {
        let history = VisitHistory::new();
        assert!(history.is_empty());
        assert!(history.all().is_empty());
    }
}
