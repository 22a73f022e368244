pub mod config;
pub mod directory;
pub mod display;
pub mod domain;
pub mod errors;
pub mod history;
pub mod hours;
pub mod recommendation;

pub use directory::{DepartmentDirectory, DepartmentRecord, StaticDirectory};
pub use display::{resolve_card, RecommendationCard};
pub use domain::department::Department;
pub use domain::visit::VisitRecord;
pub use errors::{ApplicationError, DomainError};
pub use history::VisitHistory;
pub use hours::BusinessHours;
pub use recommendation::{
    recommend, recommend_at, CategoryRule, Confidence, RecommendationResult,
    RuleBasedRecommendation, ScoringThresholds,
};
