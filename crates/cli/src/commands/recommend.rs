use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use helpdesk_core::config::AppConfig;
use helpdesk_core::errors::ApplicationError;
use helpdesk_core::{resolve_card, RuleBasedRecommendation, StaticDirectory, VisitHistory};
use tracing::info;

use super::CommandResult;

const COMMAND: &str = "recommend";

#[derive(Debug, Clone, Default)]
pub struct RecommendOptions {
    pub history_path: PathBuf,
    /// Instant recency is measured against. Defaults to the current time.
    pub now: Option<DateTime<Utc>>,
    /// Local wall-clock time for phone availability. Defaults to `now` in the
    /// host's local zone.
    pub local_time: Option<NaiveDateTime>,
}

pub fn run(config: &AppConfig, options: RecommendOptions) -> CommandResult {
    match execute(config, options) {
        Ok(result) => result,
        Err(error) => CommandResult::from_application_error(COMMAND, &error),
    }
}

fn execute(config: &AppConfig, options: RecommendOptions) -> Result<CommandResult, ApplicationError> {
    let raw = fs::read_to_string(&options.history_path).map_err(|error| {
        ApplicationError::Input(format!(
            "could not read history file `{}`: {error}",
            options.history_path.display()
        ))
    })?;
    let history = VisitHistory::from_json(&raw)?;

    let now = options.now.unwrap_or_else(Utc::now);
    let local_time =
        options.local_time.unwrap_or_else(|| now.with_timezone(&Local).naive_local());

    let engine = RuleBasedRecommendation::with_thresholds(config.recommendation.thresholds());
    let card = engine
        .recommend_at(history.all(), now)
        .and_then(|result| resolve_card(result, &StaticDirectory::seeded(), local_time));

    info!(
        event_name = "cli.recommend.completed",
        visits = history.len(),
        department = card.as_ref().map(|card| card.result.department.as_str()).unwrap_or("none"),
        "recommendation computed"
    );

    let Some(card) = card else {
        return Ok(CommandResult::success(COMMAND, "no recommendation for this history"));
    };

    let data = serde_json::to_value(&card)
        .map_err(|error| ApplicationError::Input(format!("could not encode recommendation: {error}")))?;
    Ok(CommandResult::success_with(
        COMMAND,
        format!("recommend {} ({} confidence)", card.name, card.result.confidence.as_str()),
        Some(data),
    ))
}
