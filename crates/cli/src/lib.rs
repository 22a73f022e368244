pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::anyhow;
use chrono::{DateTime, NaiveDateTime, Utc};
use clap::{Parser, Subcommand};
use helpdesk_core::config::{AppConfig, ConfigOverrides, LoadOptions};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "helpdesk",
    about = "Helpdesk department routing CLI",
    long_about = "Score a session's page-visit history, suggest a support department, and inspect the department directory.",
    after_help = "Examples:\n  helpdesk recommend --history visits.json\n  helpdesk departments\n  helpdesk config"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to a helpdesk.toml config file")]
    config: Option<PathBuf>,
    #[arg(long, global = true, help = "Override the configured log level")]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Recommend a department from a JSON visit history file")]
    Recommend {
        #[arg(long, help = "JSON array of {page, time_spent, timestamp} records")]
        history: PathBuf,
        #[arg(long, help = "Evaluate recency as of this RFC 3339 instant")]
        now: Option<DateTime<Utc>>,
        #[arg(long, help = "Local time for phone availability, e.g. 2024-03-04T10:00:00")]
        local_time: Option<NaiveDateTime>,
    },
    #[command(about = "List departments with phone numbers and current availability")]
    Departments {
        #[arg(long, help = "Local time to evaluate business hours at")]
        at: Option<NaiveDateTime>,
    },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

fn init_logging(config: &AppConfig) -> anyhow::Result<()> {
    use helpdesk_core::config::LogFormat::*;

    let filter = log_filter(&config.logging.level);
    let builder =
        tracing_subscriber::fmt().with_target(false).with_env_filter(filter).with_writer(std::io::stderr);

    match config.logging.format {
        Compact => builder.compact().try_init(),
        Pretty => builder.pretty().try_init(),
        Json => builder.json().try_init(),
    }
    .map_err(|error| anyhow!("could not initialize logging: {error}"))
}

/// Subscriber filter for the configured level; `info` when it does not parse.
pub fn log_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let command_name = match &cli.command {
        Command::Recommend { .. } => "recommend",
        Command::Departments { .. } => "departments",
        Command::Config => "config",
    };

    let overrides = ConfigOverrides { log_level: cli.log_level, ..ConfigOverrides::default() };
    let sources = commands::config::ConfigSources::resolve(cli.config.as_deref(), overrides.clone());
    let options = LoadOptions { require_file: cli.config.is_some(), config_path: cli.config, overrides };
    let config = match commands::load_config(command_name, options) {
        Ok(config) => config,
        Err(result) => return emit(result),
    };

    if let Err(error) = init_logging(&config) {
        eprintln!("{error}");
    }

    let result = match cli.command {
        Command::Recommend { history, now, local_time } => commands::recommend::run(
            &config,
            commands::recommend::RecommendOptions { history_path: history, now, local_time },
        ),
        Command::Departments { at } => commands::departments::run(at),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run(&config, &sources) }
        }
    };

    emit(result)
}

fn emit(result: commands::CommandResult) -> ExitCode {
    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
