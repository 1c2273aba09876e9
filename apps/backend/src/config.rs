//! Environment configuration.

use std::path::PathBuf;

use korean_learner_core::queue::{DEFAULT_FORECAST_DAYS, DEFAULT_LEARN_BATCH};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Per-user study limits and grading policy.
#[derive(Debug, Clone, Copy)]
pub struct StudySettings {
    pub learn_batch_size: usize,
    /// Grade review answers pass/fail instead of four tiers.
    pub strict_grading: bool,
    pub forecast_days: u32,
}

impl Default for StudySettings {
    fn default() -> Self {
        Self {
            learn_batch_size: DEFAULT_LEARN_BATCH,
            strict_grading: false,
            forecast_days: DEFAULT_FORECAST_DAYS,
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    /// `(token, email)` pairs accepted by the static token provider.
    pub auth_tokens: Vec<(String, String)>,
    pub seed_path: Option<PathBuf>,
    pub study: StudySettings,
}

impl Config {
    /// Read configuration from environment variables.
    ///
    /// Required env vars:
    /// - AUTH_TOKENS: Comma separated `token=email` pairs
    ///
    /// Optional: HOST, PORT, DATABASE_PATH, SEED_PATH, LEARN_BATCH_SIZE,
    /// STRICT_GRADING, FORECAST_DAYS.
    pub fn from_env() -> Result<Self, ConfigError> {
        let auth_tokens = std::env::var("AUTH_TOKENS")
            .map_err(|_| ConfigError::Missing("AUTH_TOKENS"))
            .and_then(|raw| parse_auth_tokens(&raw))?;

        let defaults = StudySettings::default();

        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_var("PORT", 3000)?,
            database_path: std::env::var("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_database_path()),
            auth_tokens,
            seed_path: std::env::var("SEED_PATH").ok().map(PathBuf::from),
            study: StudySettings {
                learn_batch_size: parse_var("LEARN_BATCH_SIZE", defaults.learn_batch_size)?,
                strict_grading: parse_var("STRICT_GRADING", defaults.strict_grading)?,
                forecast_days: parse_var("FORECAST_DAYS", defaults.forecast_days)?,
            },
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}

/// Parse `token=email,token=email`.
pub fn parse_auth_tokens(raw: &str) -> Result<Vec<(String, String)>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((token, email)) if !token.trim().is_empty() && email.contains('@') => {
                Ok((token.trim().to_string(), email.trim().to_string()))
            }
            _ => Err(ConfigError::Invalid {
                name: "AUTH_TOKENS",
                value: pair.to_string(),
            }),
        })
        .collect()
}

fn default_database_path() -> PathBuf {
    // Use app data directory for production, fallback to current dir
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("korean-learner")
        .join("cards.db")
}
