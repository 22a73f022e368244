use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use helpdesk_cli::commands::{self, config, departments, recommend};
use helpdesk_core::config::{AppConfig, ConfigOverrides, LoadOptions};
use serde_json::Value;
use tempfile::TempDir;

#[test]
fn recommend_reports_billing_card_for_long_recent_visit() {
    with_env(&[], || {
        let now = fixed_now();
        let dir = TempDir::new().expect("temp dir");
        let path = write_history(
            &dir,
            &format!(
                r#"[{{"page":"billing-invoice","time_spent":90,"timestamp":{}}}]"#,
                (now - Duration::minutes(30)).timestamp_millis()
            ),
        );

        let result = recommend::run(&load_defaults(&dir), options(path, now, monday_at(10)));
        assert_eq!(result.exit_code, 0, "expected successful recommendation");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "recommend");
        assert_eq!(payload["status"], "ok");
        assert_eq!(payload["data"]["department"], "billing");
        assert_eq!(payload["data"]["score"], "15.0");
        assert_eq!(payload["data"]["confidence"], "high");
        assert_eq!(payload["data"]["phone_active"], true);
    });
}

#[test]
fn recommend_reports_closed_phone_outside_hours() {
    with_env(&[], || {
        let now = fixed_now();
        let dir = TempDir::new().expect("temp dir");
        let path = write_history(
            &dir,
            r#"[{"page":"pricing","time_spent":45,"timestamp":"2024-03-01T09:00:00Z"}]"#,
        );

        let result = recommend::run(&load_defaults(&dir), options(path, now, monday_at(21)));
        let payload = parse_payload(&result.output);
        assert_eq!(payload["data"]["department"], "sales");
        assert_eq!(payload["data"]["score"], "7.5");
        assert_eq!(payload["data"]["confidence"], "medium");
        assert_eq!(payload["data"]["phone_active"], false);
    });
}

#[test]
fn recommend_without_signal_has_no_data() {
    with_env(&[], || {
        let dir = TempDir::new().expect("temp dir");
        let path = write_history(&dir, "[]");

        let result = recommend::run(&load_defaults(&dir), options(path, fixed_now(), monday_at(10)));
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["status"], "ok");
        assert!(payload.get("data").is_none(), "absent recommendation carries no data");
    });
}

#[test]
fn recommend_respects_configured_floor() {
    with_env(&[("HELPDESK_RECOMMENDATION_SIGNIFICANCE_FLOOR", "5")], || {
        let now = fixed_now();
        let dir = TempDir::new().expect("temp dir");
        let path = write_history(
            &dir,
            &format!(
                r#"[{{"page":"tech-help","time_spent":10,"timestamp":{}}}]"#,
                (now - Duration::hours(2)).timestamp_millis()
            ),
        );

        let result = recommend::run(&load_defaults(&dir), options(path, now, monday_at(10)));
        let payload = parse_payload(&result.output);
        assert!(payload.get("data").is_none(), "4.8 must not clear a floor of 5");
    });
}

#[test]
fn recommend_rejects_out_of_order_history() {
    with_env(&[], || {
        let dir = TempDir::new().expect("temp dir");
        let path = write_history(
            &dir,
            r#"[
                {"page":"pricing","time_spent":45,"timestamp":1700000060000},
                {"page":"billing","time_spent":45,"timestamp":1700000000000}
            ]"#,
        );

        let result = recommend::run(&load_defaults(&dir), options(path, fixed_now(), monday_at(10)));
        assert_eq!(result.exit_code, commands::EXIT_INPUT_FAILURE);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "domain_validation");
    });
}

#[test]
fn recommend_reports_malformed_history_as_input_failure() {
    with_env(&[], || {
        let dir = TempDir::new().expect("temp dir");
        let path = write_history(&dir, "{not json");

        let result = recommend::run(&load_defaults(&dir), options(path, fixed_now(), monday_at(10)));
        assert_eq!(result.exit_code, commands::EXIT_INPUT_FAILURE);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "input");
    });
}

#[test]
fn recommend_reports_missing_history_file() {
    with_env(&[], || {
        let dir = TempDir::new().expect("temp dir");
        let missing = dir.path().join("nope.json");

        let result =
            recommend::run(&load_defaults(&dir), options(missing, fixed_now(), monday_at(10)));
        assert_eq!(result.exit_code, commands::EXIT_INPUT_FAILURE);
        assert_eq!(parse_payload(&result.output)["error_class"], "input");
    });
}

#[test]
fn invalid_config_maps_to_config_failure() {
    with_env(&[("HELPDESK_LOG_LEVEL", "loud")], || {
        let dir = TempDir::new().expect("temp dir");
        let error = commands::load_config("recommend", missing_config(&dir))
            .expect_err("invalid log level should fail");

        assert_eq!(error.exit_code, commands::EXIT_CONFIG_FAILURE);
        let payload = parse_payload(&error.output);
        assert_eq!(payload["error_class"], "config_validation");
    });
}

#[test]
fn departments_lists_every_line_with_availability() {
    // Saturday: tech (24/7) and support (daily) are open.
    let saturday = NaiveDate::from_ymd_opt(2024, 3, 9)
        .and_then(|date| date.and_hms_opt(12, 0, 0))
        .expect("valid datetime");

    let result = departments::run(Some(saturday));
    assert_eq!(result.exit_code, 0);

    let payload = parse_payload(&result.output);
    let lines = payload["data"].as_array().expect("department list");
    assert_eq!(lines.len(), 5);

    let open: Vec<&str> = lines
        .iter()
        .filter(|line| line["phone_active"] == true)
        .filter_map(|line| line["department"].as_str())
        .collect();
    assert_eq!(open, vec!["support", "tech"]);
}

#[test]
fn config_output_attributes_env_source() {
    with_env(&[("HELPDESK_RECOMMENDATION_HIGH_THRESHOLD", "9")], || {
        let dir = TempDir::new().expect("temp dir");
        let output = config::run(&load_defaults(&dir), &config::ConfigSources::default());

        assert!(output.contains(
            "- recommendation.high_threshold = 9 (source: env (HELPDESK_RECOMMENDATION_HIGH_THRESHOLD))"
        ));
        assert!(output.contains("- recommendation.significance_floor = 3 (source: default)"));
    });
}

#[test]
fn config_output_attributes_explicit_file_and_override() {
    with_env(&[], || {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[recommendation]\nsignificance_floor = 4.0\n").expect("write config fixture");

        let overrides =
            ConfigOverrides { log_level: Some("debug".to_owned()), ..ConfigOverrides::default() };
        let sources = config::ConfigSources::resolve(Some(path.as_path()), overrides.clone());
        let loaded = AppConfig::load(LoadOptions {
            config_path: Some(path.clone()),
            require_file: true,
            overrides,
        })
        .expect("config should load");

        let output = config::run(&loaded, &sources);
        assert!(output.contains(&format!(
            "- recommendation.significance_floor = 4 (source: file ({}))",
            path.display()
        )));
        assert!(output.contains("- logging.level = debug (source: override (--log-level))"));
        assert!(output.contains("- recommendation.medium_threshold = 5 (source: default)"));
    });
}

#[test]
fn config_output_attributes_log_level_alias() {
    with_env(&[("HELPDESK_LOG_LEVEL", "warn")], || {
        let dir = TempDir::new().expect("temp dir");
        let output = config::run(&load_defaults(&dir), &config::ConfigSources::default());

        assert!(output.contains("- logging.level = warn (source: env (HELPDESK_LOG_LEVEL))"));
    });
}

#[test]
fn config_output_ignores_blank_env_values() {
    with_env(&[("HELPDESK_RECOMMENDATION_HIGH_THRESHOLD", "  "), ("HELPDESK_LOGGING_LEVEL", "")], || {
        let dir = TempDir::new().expect("temp dir");
        let output = config::run(&load_defaults(&dir), &config::ConfigSources::default());

        assert!(output.contains("- recommendation.high_threshold = 8 (source: default)"));
        assert!(output.contains("- logging.level = info (source: default)"));
    });
}

fn fixed_now() -> DateTime<Utc> {
    "2024-03-04T15:00:00Z".parse().expect("valid instant")
}

fn monday_at(hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 4)
        .and_then(|date| date.and_hms_opt(hour, 0, 0))
        .expect("valid datetime")
}

fn options(path: PathBuf, now: DateTime<Utc>, local_time: NaiveDateTime) -> recommend::RecommendOptions {
    recommend::RecommendOptions { history_path: path, now: Some(now), local_time: Some(local_time) }
}

fn write_history(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("visits.json");
    fs::write(&path, contents).expect("write history fixture");
    path
}

fn missing_config(dir: &TempDir) -> LoadOptions {
    LoadOptions { config_path: Some(dir.path().join("absent.toml")), ..LoadOptions::default() }
}

fn load_defaults(dir: &TempDir) -> AppConfig {
    AppConfig::load(missing_config(dir)).expect("config should load")
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "HELPDESK_RECOMMENDATION_SIGNIFICANCE_FLOOR",
        "HELPDESK_RECOMMENDATION_MEDIUM_THRESHOLD",
        "HELPDESK_RECOMMENDATION_HIGH_THRESHOLD",
        "HELPDESK_LOGGING_LEVEL",
        "HELPDESK_LOGGING_FORMAT",
        "HELPDESK_LOG_LEVEL",
        "HELPDESK_LOG_FORMAT",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
