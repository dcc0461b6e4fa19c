//! Naming resolution and search ranking for mkvmender.
//!
//! [`NamingEngine`] is the caller-facing surface. It holds a connection
//! pool and two settings, so it is cheap to clone and every call is
//! independent:
//!
//! - identity registry ([`registry`]): content fingerprints, get-or-create
//! - authors ([`authors`])
//! - submission ledger ([`ledger`]): proposals, lookups, metadata
//! - vote aggregator ([`votes`])
//! - title search and grouping ([`search`])
//! - moderation and admin reporting ([`admin`])
//! - batch rename previews ([`batch`])

use mkvmender_core::fingerprint::DEFAULT_PARTIAL_CHUNK_BYTES;
use sqlx::PgPool;

pub mod admin;
pub mod authors;
pub mod batch;
pub mod config;
pub mod error;
pub mod ledger;
pub mod registry;
pub mod search;
pub mod telemetry;
pub mod votes;

pub use config::EngineConfig;
pub use error::{EngineError, EngineResult};

/// Entry point for every naming operation.
#[derive(Debug, Clone)]
pub struct NamingEngine {
    pool: PgPool,
    partial_hash_chunk_bytes: u64,
    fuzzy_search_default: bool,
}

impl NamingEngine {
    /// Wrap an existing pool. Migrations are assumed to be applied.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            partial_hash_chunk_bytes: DEFAULT_PARTIAL_CHUNK_BYTES,
            fuzzy_search_default: true,
        }
    }

    /// Connect, verify the database is reachable, and apply migrations.
    pub async fn connect(config: &EngineConfig) -> EngineResult<Self> {
        let pool = mkvmender_db::create_pool(&config.database_url, config.max_connections).await?;
        tracing::info!(
            max_connections = config.max_connections,
            "Database connection pool created"
        );

        mkvmender_db::health_check(&pool).await?;
        tracing::info!("Database health check passed");

        mkvmender_db::run_migrations(&pool).await?;
        tracing::info!("Database migrations applied");

        Ok(Self::new(pool)
            .with_partial_hash_chunk_bytes(config.partial_hash_chunk_bytes)
            .with_fuzzy_search_default(config.fuzzy_search_default))
    }

    pub fn with_partial_hash_chunk_bytes(mut self, chunk_bytes: u64) -> Self {
        self.partial_hash_chunk_bytes = chunk_bytes.max(1);
        self
    }

    pub fn with_fuzzy_search_default(mut self, fuzzy: bool) -> Self {
        self.fuzzy_search_default = fuzzy;
        self
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
