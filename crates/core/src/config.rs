use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::recommendation::{ScoringThresholds, DEFAULT_THRESHOLDS};

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub recommendation: RecommendationConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RecommendationConfig {
    pub significance_floor: f64,
    pub medium_threshold: f64,
    pub high_threshold: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
    pub significance_floor: Option<f64>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            recommendation: RecommendationConfig {
                significance_floor: DEFAULT_THRESHOLDS.significance_floor,
                medium_threshold: DEFAULT_THRESHOLDS.medium,
                high_threshold: DEFAULT_THRESHOLDS.high,
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl RecommendationConfig {
    pub fn thresholds(&self) -> ScoringThresholds {
        ScoringThresholds {
            significance_floor: self.significance_floor,
            medium: self.medium_threshold,
            high: self.high_threshold,
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("helpdesk.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(recommendation) = patch.recommendation {
            if let Some(significance_floor) = recommendation.significance_floor {
                self.recommendation.significance_floor = significance_floor;
            }
            if let Some(medium_threshold) = recommendation.medium_threshold {
                self.recommendation.medium_threshold = medium_threshold;
            }
            if let Some(high_threshold) = recommendation.high_threshold {
                self.recommendation.high_threshold = high_threshold;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("HELPDESK_RECOMMENDATION_SIGNIFICANCE_FLOOR") {
            self.recommendation.significance_floor =
                parse_f64("HELPDESK_RECOMMENDATION_SIGNIFICANCE_FLOOR", &value)?;
        }
        if let Some(value) = read_env("HELPDESK_RECOMMENDATION_MEDIUM_THRESHOLD") {
            self.recommendation.medium_threshold =
                parse_f64("HELPDESK_RECOMMENDATION_MEDIUM_THRESHOLD", &value)?;
        }
        if let Some(value) = read_env("HELPDESK_RECOMMENDATION_HIGH_THRESHOLD") {
            self.recommendation.high_threshold =
                parse_f64("HELPDESK_RECOMMENDATION_HIGH_THRESHOLD", &value)?;
        }

        if let Some(value) = read_first_env(LOG_LEVEL_ENV_KEYS) {
            self.logging.level = value;
        }
        if let Some(value) = read_first_env(LOG_FORMAT_ENV_KEYS) {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(log_format) = overrides.log_format {
            self.logging.format = log_format;
        }
        if let Some(significance_floor) = overrides.significance_floor {
            self.recommendation.significance_floor = significance_floor;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_recommendation(&self.recommendation)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

/// Config file `AppConfig::load` reads: the explicit path when it exists,
/// otherwise the first of `helpdesk.toml` and `config/helpdesk.toml`.
pub fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("helpdesk.toml"), PathBuf::from("config/helpdesk.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_recommendation(recommendation: &RecommendationConfig) -> Result<(), ConfigError> {
    let significance_floor = recommendation.significance_floor;
    let medium_threshold = recommendation.medium_threshold;
    let high_threshold = recommendation.high_threshold;

    if ![significance_floor, medium_threshold, high_threshold].iter().all(|value| value.is_finite())
    {
        return Err(ConfigError::Validation(
            "recommendation thresholds must be finite numbers".to_string(),
        ));
    }

    if significance_floor <= 0.0 {
        return Err(ConfigError::Validation(
            "recommendation.significance_floor must be greater than zero".to_string(),
        ));
    }

    if !(significance_floor <= medium_threshold && medium_threshold <= high_threshold) {
        return Err(ConfigError::Validation(
            "recommendation thresholds must satisfy significance_floor <= medium_threshold <= high_threshold"
                .to_string(),
        ));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

/// Env keys for `logging.level`, primary first.
pub const LOG_LEVEL_ENV_KEYS: &[&str] = &["HELPDESK_LOGGING_LEVEL", "HELPDESK_LOG_LEVEL"];

/// Env keys for `logging.format`, primary first.
pub const LOG_FORMAT_ENV_KEYS: &[&str] = &["HELPDESK_LOGGING_FORMAT", "HELPDESK_LOG_FORMAT"];

/// Value of `key`, ignoring unset and blank variables.
pub fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn read_first_env(keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| read_env(key))
}

fn parse_f64(key: &str, value: &str) -> Result<f64, ConfigError> {
    value.trim().parse::<f64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    recommendation: Option<RecommendationPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct RecommendationPatch {
    significance_floor: Option<f64>,
    medium_threshold: Option<f64>,
    high_threshold: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}
