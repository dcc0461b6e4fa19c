use mkvmender_core::error::CoreError;
use mkvmender_db::constraints::{FOREIGN_KEY_VIOLATION, UNIQUE_VIOLATION};

/// Error type for every [`NamingEngine`](crate::NamingEngine) operation.
///
/// Wraps [`CoreError`] for domain errors and adds the collaborator
/// failures the engine can run into.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A domain-level error from `mkvmender_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The store could not be reached or rejected a statement.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for engine return values.
pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    /// Whether this is a [`CoreError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, EngineError::Core(CoreError::NotFound { .. }))
    }
}

/// Classify a failed write.
///
/// - Unique violations on a `uq_` constraint become [`CoreError::Conflict`].
/// - Foreign key violations become [`CoreError::NotFound`]; `referenced`
///   maps the constraint name to the missing entity and its key.
/// - Everything else stays a store error.
pub(crate) fn classify_write_error<F>(err: sqlx::Error, referenced: F) -> EngineError
where
    F: FnOnce(&str) -> Option<CoreError>,
{
    let classified = match &err {
        sqlx::Error::Database(db_err) => {
            classify_violation(db_err.code().as_deref(), db_err.constraint(), referenced)
        }
        _ => None,
    };

    match classified {
        Some(core) => core.into(),
        None => {
            tracing::error!(error = %err, "Database error");
            EngineError::StoreUnavailable(err)
        }
    }
}

fn classify_violation<F>(
    code: Option<&str>,
    constraint: Option<&str>,
    referenced: F,
) -> Option<CoreError>
where
    F: FnOnce(&str) -> Option<CoreError>,
{
    let constraint = constraint.unwrap_or("unknown");
    match code {
        Some(UNIQUE_VIOLATION) if constraint.starts_with("uq_") => Some(CoreError::Conflict(
            format!("Duplicate value violates unique constraint: {constraint}"),
        )),
        Some(FOREIGN_KEY_VIOLATION) => Some(
            referenced(constraint)
                .unwrap_or_else(|| CoreError::not_found("referenced row", constraint)),
        ),
        _ => None,
    }
}
