//! CLI module for minispdlog.
//!
//! Renders one message through the configured sinks, so patterns and thresholds can be tried
//! from a shell before they go into a config file.

use crate::config::{Config, SinkConfig};
use crate::internal;
use crate::level::Level;
use crate::message::LogMessage;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

/// Log level for CLI arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Critical,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Self::Trace,
            LogLevel::Debug => Self::Debug,
            LogLevel::Info => Self::Info,
            LogLevel::Warn => Self::Warn,
            LogLevel::Error => Self::Error,
            LogLevel::Critical => Self::Critical,
        }
    }
}

/// minispdlog - Format a log line from the command line.
#[derive(Debug, Parser)]
#[command(
    name = "minispdlog",
    version,
    about = "Format a log line from the command line"
)]
pub struct Cli {
    /// Config file (defaults to $MINISPDLOG_CONFIG or the platform config directory)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Pattern for every sink, e.g. "[%H:%M:%S] [%l] %v"
    #[arg(short, long)]
    pub pattern: Option<String>,
    /// Sink threshold for every sink
    #[arg(short, long, value_name = "LEVEL")]
    pub threshold: Option<String>,
    /// Logger name rendered by %n
    #[arg(short, long, default_value = "minispdlog")]
    pub name: String,
    /// Write to stderr instead of the configured sinks
    #[arg(long)]
    pub stderr: bool,
    /// Render timestamps in UTC
    #[arg(long)]
    pub utc: bool,
    /// Message level
    #[arg(value_enum)]
    pub level: LogLevel,
    /// Message text
    #[arg(required = true)]
    pub message: Vec<String>,
}

/// Folds command-line overrides into a loaded config; flags win over every sink entry.
pub fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(ref pattern) = cli.pattern {
        config.general.pattern.clone_from(pattern);
        for sink in &mut config.sinks {
            sink.pattern = None;
        }
    }
    if let Some(ref threshold) = cli.threshold {
        config.general.level.clone_from(threshold);
        for sink in &mut config.sinks {
            sink.level = None;
        }
    }
    if cli.utc {
        config.general.time_zone = "utc".to_string();
    }
    if cli.stderr {
        config.sinks = vec![SinkConfig {
            kind: "stderr".to_string(),
            ..SinkConfig::default()
        }];
    }
}

/// Loads config, applies overrides, and logs the message to every sink that accepts it.
#[must_use]
pub fn run(cli: &Cli) -> ExitCode {
    let loaded = match cli.config {
        Some(ref path) => Config::load_from(path),
        None => Config::load(),
    };
    let mut config = match loaded {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Diagnostics about the overrides below go through the internal sink
    internal::init_with_config(&config);
    apply_overrides(&mut config, cli);

    let payload = cli.message.join(" ");
    let msg = LogMessage::new(&cli.name, cli.level.into(), &payload);

    let mut status = ExitCode::SUCCESS;
    for sink in config.build_sinks() {
        if !sink.should_log(msg.level) {
            continue;
        }
        if let Err(e) = sink.log(&msg).and_then(|()| sink.flush()) {
            internal::error("CLI", &format!("Failed to write message: {e}"));
            status = ExitCode::FAILURE;
        }
    }
    status
}
