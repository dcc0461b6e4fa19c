//! Identity registry: one row per distinct content fingerprint.

use mkvmender_core::error::CoreError;
use mkvmender_core::fingerprint::validate_fingerprint;
use mkvmender_core::media::MediaKind;
use mkvmender_core::types::DbId;
use mkvmender_db::models::file_hash::{CreateFileHash, FileHash};
use mkvmender_db::repositories::FileHashRepo;

use crate::error::{classify_write_error, EngineResult};
use crate::NamingEngine;

impl NamingEngine {
    /// Return the identity for `fingerprint`, creating it if needed.
    ///
    /// Safe under concurrency: every caller for the same fingerprint gets the
    /// same row. The first registration's size and kind are kept.
    pub async fn resolve_or_create_identity(
        &self,
        fingerprint: &str,
        file_size: i64,
        media_kind: MediaKind,
    ) -> EngineResult<FileHash> {
        let hash = validate_fingerprint(fingerprint)?;
        if file_size < 0 {
            return Err(CoreError::Validation(format!(
                "file size must not be negative, got {file_size}"
            ))
            .into());
        }

        let input = CreateFileHash {
            hash: hash.to_string(),
            file_size,
            media_type: media_kind,
        };
        if let Some(created) = FileHashRepo::insert_if_absent(&self.pool, &input)
            .await
            .map_err(|e| classify_write_error(e, |_| None))?
        {
            tracing::info!(hash_id = created.id, hash, file_size, "Identity registered");
            return Ok(created);
        }

        let existing = FileHashRepo::find_by_hash(&self.pool, hash)
            .await?
            .ok_or_else(|| {
                CoreError::Conflict(format!(
                    "identity {hash} was neither inserted nor readable"
                ))
            })?;

        if existing.file_size != file_size || existing.media_type != media_kind.as_str() {
            tracing::debug!(
                hash_id = existing.id,
                stored_size = existing.file_size,
                stored_kind = %existing.media_type,
                file_size,
                media_kind = %media_kind,
                "Identity re-registered with different attributes; keeping stored values",
            );
        }
        Ok(existing)
    }

    pub async fn identity_by_fingerprint(&self, fingerprint: &str) -> EngineResult<FileHash> {
        let hash = validate_fingerprint(fingerprint)?;
        FileHashRepo::find_by_hash(&self.pool, hash)
            .await?
            .ok_or_else(|| CoreError::not_found("identity", hash).into())
    }

    pub async fn identity_by_id(&self, id: DbId) -> EngineResult<FileHash> {
        FileHashRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| CoreError::not_found("identity", id).into())
    }
}
