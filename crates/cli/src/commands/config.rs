use std::fs;
use std::path::{Path, PathBuf};

use helpdesk_core::config::{
    read_env, resolve_config_path, AppConfig, ConfigOverrides, LOG_FORMAT_ENV_KEYS,
    LOG_LEVEL_ENV_KEYS,
};
use toml::Value;

/// Where the effective config came from: the file `AppConfig::load` read and
/// the explicit overrides it applied last.
#[derive(Clone, Debug, Default)]
pub struct ConfigSources {
    pub config_path: Option<PathBuf>,
    pub overrides: ConfigOverrides,
}

impl ConfigSources {
    /// Sources for a load with `explicit_path` (e.g. `--config`) and `overrides`.
    pub fn resolve(explicit_path: Option<&Path>, overrides: ConfigOverrides) -> Self {
        Self { config_path: resolve_config_path(explicit_path), overrides }
    }
}

pub fn run(config: &AppConfig, sources: &ConfigSources) -> String {
    let config_file_path = sources.config_path.as_deref();
    let config_file_doc = load_config_file_doc(config_file_path);
    let overrides = &sources.overrides;
    let source = |key_path: &str, override_flag: Option<&str>, env_keys: &[&str]| {
        field_source(key_path, override_flag, env_keys, config_file_doc.as_ref(), config_file_path)
    };

    let significance_floor_override =
        overrides.significance_floor.is_some().then_some("significance_floor");
    let log_level_override = overrides.log_level.is_some().then_some("--log-level");
    let log_format_override = overrides.log_format.is_some().then_some("log_format");

    let lines = [
        "effective config (source precedence: override > env > file > default):".to_string(),
        render_line(
            "recommendation.significance_floor",
            &config.recommendation.significance_floor.to_string(),
            source(
                "recommendation.significance_floor",
                significance_floor_override,
                &["HELPDESK_RECOMMENDATION_SIGNIFICANCE_FLOOR"],
            ),
        ),
        render_line(
            "recommendation.medium_threshold",
            &config.recommendation.medium_threshold.to_string(),
            source(
                "recommendation.medium_threshold",
                None,
                &["HELPDESK_RECOMMENDATION_MEDIUM_THRESHOLD"],
            ),
        ),
        render_line(
            "recommendation.high_threshold",
            &config.recommendation.high_threshold.to_string(),
            source("recommendation.high_threshold", None, &["HELPDESK_RECOMMENDATION_HIGH_THRESHOLD"]),
        ),
        render_line(
            "logging.level",
            &config.logging.level,
            source("logging.level", log_level_override, LOG_LEVEL_ENV_KEYS),
        ),
        render_line(
            "logging.format",
            &format!("{:?}", config.logging.format),
            source("logging.format", log_format_override, LOG_FORMAT_ENV_KEYS),
        ),
    ];

    lines.join("\n")
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    override_flag: Option<&str>,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(flag) = override_flag {
        return format!("override ({flag})");
    }

    // First non-blank key wins, matching the loader's alias order.
    if let Some(env_key) = env_keys.iter().find(|key| read_env(key).is_some()) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}
