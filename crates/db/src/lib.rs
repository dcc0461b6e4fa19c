//! PostgreSQL persistence for the naming engine.
//!
//! Holds the migrations, the row models, and one zero-sized repository per
//! table. Repositories only fetch and write; ranking lives in
//! `mkvmender_core`.

use sqlx::postgres::PgPoolOptions;

pub mod constraints;
pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to verify the pool can reach the database.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    tracing::info!("Running naming schema migrations");
    sqlx::migrate!("../../db/migrations").run(pool).await
}
