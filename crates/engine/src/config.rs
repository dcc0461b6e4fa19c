use std::fmt::Display;
use std::str::FromStr;

use mkvmender_core::fingerprint::DEFAULT_PARTIAL_CHUNK_BYTES;

use crate::error::{EngineError, EngineResult};
use crate::telemetry::LogFormat;

/// Default maximum number of pooled database connections.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 20;

/// Engine configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// PostgreSQL connection string. Required.
    pub database_url: String,
    /// Pool size (default: `20`).
    pub max_connections: u32,
    /// Chunk size for partial fingerprints in batch previews (default: `65536`).
    pub partial_hash_chunk_bytes: u64,
    /// Whether `search` matches fuzzily when the caller does not say (default: `true`).
    pub fuzzy_search_default: bool,
    /// Log output format (default: `text`).
    pub log_format: LogFormat,
}

impl EngineConfig {
    /// Configuration with defaults for everything but the database URL.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            partial_hash_chunk_bytes: DEFAULT_PARTIAL_CHUNK_BYTES,
            fuzzy_search_default: true,
            log_format: LogFormat::default(),
        }
    }

    /// Load configuration from the process environment, reading `.env`
    /// first if present.
    ///
    /// | Env Var                    | Default  |
    /// |----------------------------|----------|
    /// | `DATABASE_URL`             | required |
    /// | `DB_MAX_CONNECTIONS`       | `20`     |
    /// | `PARTIAL_HASH_CHUNK_BYTES` | `65536`  |
    /// | `SEARCH_FUZZY_DEFAULT`     | `true`   |
    /// | `LOG_FORMAT`               | `text`   |
    pub fn from_env() -> EngineResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_vars<F>(var: F) -> EngineResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = var("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| EngineError::Config("DATABASE_URL must be set".into()))?;

        let mut config = Self::new(database_url);
        config.max_connections = parse_var(&var, "DB_MAX_CONNECTIONS", config.max_connections)?;
        config.partial_hash_chunk_bytes =
            parse_var(&var, "PARTIAL_HASH_CHUNK_BYTES", config.partial_hash_chunk_bytes)?;
        config.fuzzy_search_default =
            parse_var(&var, "SEARCH_FUZZY_DEFAULT", config.fuzzy_search_default)?;
        config.log_format = parse_var(&var, "LOG_FORMAT", config.log_format)?;

        if config.max_connections == 0 {
            return Err(EngineError::Config(
                "DB_MAX_CONNECTIONS must be at least 1".into(),
            ));
        }
        if config.partial_hash_chunk_bytes == 0 {
            return Err(EngineError::Config(
                "PARTIAL_HASH_CHUNK_BYTES must be at least 1".into(),
            ));
        }

        Ok(config)
    }
}

fn parse_var<F, T>(var: &F, name: &str, default: T) -> EngineResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match var(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| EngineError::Config(format!("{name} is invalid ({raw:?}): {e}"))),
        None => Ok(default),
    }
}
