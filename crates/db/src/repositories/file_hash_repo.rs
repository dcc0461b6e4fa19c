//! Repository for the `file_hashes` table.

use mkvmender_core::types::DbId;
use sqlx::PgPool;

use crate::models::file_hash::{CreateFileHash, FileHash};

/// Column list for `file_hashes` queries.
const COLUMNS: &str = "id, hash, file_size, media_type, created_at";

/// Provides get-or-create and lookup for content identities.
pub struct FileHashRepo;

impl FileHashRepo {
    /// Insert the identity unless the hash is already registered.
    ///
    /// Returns `None` when another row owns the hash; the caller then reads
    /// that row with [`FileHashRepo::find_by_hash`]. Concurrent callers never
    /// see a unique violation.
    pub async fn insert_if_absent(
        pool: &PgPool,
        input: &CreateFileHash,
    ) -> Result<Option<FileHash>, sqlx::Error> {
        let query = format!(
            "INSERT INTO file_hashes (hash, file_size, media_type) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (hash) DO NOTHING \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FileHash>(&query)
            .bind(&input.hash)
            .bind(input.file_size)
            .bind(input.media_type.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Find an identity by its fingerprint.
    pub async fn find_by_hash(pool: &PgPool, hash: &str) -> Result<Option<FileHash>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM file_hashes WHERE hash = $1");
        sqlx::query_as::<_, FileHash>(&query)
            .bind(hash)
            .fetch_optional(pool)
            .await
    }

    /// Find an identity by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<FileHash>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM file_hashes WHERE id = $1");
        sqlx::query_as::<_, FileHash>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
