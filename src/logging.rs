//! Structured logging setup.
//!
//! The library only emits `tracing` events; nothing is printed unless a
//! subscriber is installed. Test suites and the CLI call [`init_logging`] once.
//!
//! ## Environment Variables
//!
//! - `ROUTESHIM_LOG_LEVEL`: trace/debug/info/warn/error (default: `warn`)
//! - `ROUTESHIM_LOG_FORMAT`: `pretty` or `json` (default: `pretty`)
//!
//! `RUST_LOG`, when set, takes precedence over the level.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Log format: pretty for local test runs, JSON for CI log collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log level: trace/debug/info/warn/error
    pub level: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl LogConfig {
    /// Parse configuration from environment variables with defaults
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| env::var(key).ok())
    }

    /// Apply `ROUTESHIM_LOG_*` overrides from `lookup`.
    #[must_use]
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(level) = lookup("ROUTESHIM_LOG_LEVEL") {
            self.level = level;
        }
        if let Some(format) = lookup("ROUTESHIM_LOG_FORMAT") {
            self.format = LogFormat::parse(&format);
        }
        self
    }
}

/// Install the global subscriber. Output goes to stderr.
///
/// Fails if a global subscriber is already set; test harnesses that call this
/// from several tests can ignore the error.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .with_context(|| format!("invalid log level `{}`", config.level))?;

    let fmt_layer = match config.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .pretty()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize logging")
}
