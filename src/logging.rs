//! Logging initialization.

use crate::config::ConfigError;
use std::str::FromStr;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            _ => Err(ConfigError::InvalidValue {
                key: "LOG_FORMAT",
                value: raw.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub format: LogFormat,
    pub include_target: bool,
    pub include_source_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            // Default to human-friendly terminal output.
            format: LogFormat::Pretty,
            include_target: false,
            include_source_location: false,
        }
    }
}

impl LoggingConfig {
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_target(mut self, include_target: bool) -> Self {
        self.include_target = include_target;
        self
    }

    pub fn with_source_location(mut self, include_source_location: bool) -> Self {
        self.include_source_location = include_source_location;
        self
    }
}

/// Installs the global subscriber. `RUST_LOG` overrides the default filter.
pub fn init_logging(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    let terminal_layer = tracing_subscriber::fmt::layer()
        .with_target(config.include_target)
        .with_file(config.include_source_location)
        .with_line_number(config.include_source_location);

    let init_result = match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(terminal_layer.json())
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(terminal_layer.pretty())
            .try_init(),
    };

    if let Err(err) = init_result {
        // A subscriber installed by a parent binary or test harness wins.
        if err.to_string().contains("already been set") {
            return Ok(());
        }
        return Err(Box::new(err));
    }

    info!(format = ?config.format, "Logging system initialized");
    Ok(())
}
