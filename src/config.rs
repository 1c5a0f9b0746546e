//! Process configuration read from the environment.

use crate::logging::{LogFormat, LoggingConfig};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://core_management.db?mode=rwc";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Empty database url")]
    EmptyDatabaseUrl,
    #[error("Invalid max connections {0}: must be at least 1")]
    InvalidMaxConnections(u32),
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub sqlx_logging: bool,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: sanitize_sqlite_url(url.into()),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            sqlx_logging: false,
        }
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    pub fn with_sqlx_logging(mut self, sqlx_logging: bool) -> Self {
        self.sqlx_logging = sqlx_logging;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.trim().is_empty() {
            return Err(ConfigError::EmptyDatabaseUrl);
        }
        if self.max_connections == 0 {
            return Err(ConfigError::InvalidMaxConnections(self.max_connections));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidValue {
                    key: "DATABASE_MAX_CONNECTIONS",
                    value: raw.clone(),
                })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let sqlx_logging = match lookup("DATABASE_SQLX_LOGGING") {
            Some(raw) => parse_bool("DATABASE_SQLX_LOGGING", &raw)?,
            None => false,
        };

        let format = match lookup("LOG_FORMAT") {
            Some(raw) => raw.parse::<LogFormat>()?,
            None => LogFormat::Pretty,
        };

        let include_target = match lookup("LOG_TARGET") {
            Some(raw) => parse_bool("LOG_TARGET", &raw)?,
            None => false,
        };

        let include_source_location = match lookup("LOG_SOURCE_LOCATION") {
            Some(raw) => parse_bool("LOG_SOURCE_LOCATION", &raw)?,
            None => false,
        };

        let database = DatabaseConfig::new(url)
            .with_max_connections(max_connections)
            .with_sqlx_logging(sqlx_logging);
        database.validate()?;

        Ok(Self {
            database,
            logging: LoggingConfig::default()
                .with_format(format)
                .with_target(include_target)
                .with_source_location(include_source_location),
        })
    }
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: raw.to_string(),
        }),
    }
}

/// Drops any `foreign_keys` parameter from a SQLite URL.
///
/// The driver enables foreign keys by default and delete protection relies
/// on them, so the URL is not allowed to switch them off. Both the
/// `sqlite://path` and `sqlite:path` forms are handled.
pub fn sanitize_sqlite_url(database_url: String) -> String {
    if !database_url.starts_with("sqlite:") {
        return database_url;
    }
    let Some((base, query)) = database_url.split_once('?') else {
        return database_url;
    };

    let kept: Vec<&str> = query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| {
            let key = pair.split_once('=').map_or(*pair, |(key, _)| key);
            !key.eq_ignore_ascii_case("foreign_keys")
        })
        .collect();

    match kept.as_slice() {
        [] => base.to_string(),
        params => format!("{base}?{}", params.join("&")),
    }
}
