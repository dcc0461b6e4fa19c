//! Submission ledger: naming proposals per identity, with metadata.

use std::collections::HashMap;

use mkvmender_core::error::CoreError;
use mkvmender_core::fingerprint::validate_fingerprint;
use mkvmender_core::media::MediaKind;
use mkvmender_core::naming::{validate_display_name, validate_metadata_numbers};
use mkvmender_core::ranking::order_by_standing;
use mkvmender_core::types::DbId;
use mkvmender_db::constraints::{
    FK_NAMING_METADATA_SUBMISSION_ID, FK_NAMING_SUBMISSIONS_HASH_ID, FK_NAMING_SUBMISSIONS_USER_ID,
};
use mkvmender_db::models::metadata::CreateMetadata;
use mkvmender_db::models::submission::{CreateSubmission, NamingSubmission, SubmissionWithVotes};
use mkvmender_db::repositories::{FileHashRepo, MetadataRepo, SubmissionRepo};
use serde::Serialize;

use crate::error::{classify_write_error, EngineResult};
use crate::NamingEngine;

/// Everything known about one fingerprint.
///
/// For an unknown fingerprint only `hash` is set and `submissions` is empty.
#[derive(Debug, Clone, Serialize)]
pub struct HashLookup {
    pub hash: String,
    pub file_size: Option<i64>,
    pub media_type: Option<MediaKind>,
    /// Best first.
    pub submissions: Vec<SubmissionWithVotes>,
}

impl HashLookup {
    pub fn is_known(&self) -> bool {
        self.file_size.is_some()
    }
}

impl NamingEngine {
    /// Attach a proposed display name to an identity.
    ///
    /// Input is validated before anything is written. Metadata is stored
    /// after the submission; if that second write fails the submission
    /// stays and the error is returned.
    pub async fn propose_naming(
        &self,
        identity_id: DbId,
        author_id: DbId,
        name: &str,
        metadata: Option<CreateMetadata>,
    ) -> EngineResult<NamingSubmission> {
        let filename = validate_display_name(name)?;
        let metadata = metadata.map(normalize_metadata).filter(|m| !m.is_empty());
        if let Some(m) = &metadata {
            validate_metadata_numbers(m.year, m.season, m.episode)?;
        }

        let input = CreateSubmission {
            hash_id: identity_id,
            user_id: author_id,
            filename: filename.to_string(),
        };
        let submission = SubmissionRepo::create(&self.pool, &input)
            .await
            .map_err(|e| {
                classify_write_error(e, |constraint| match constraint {
                    FK_NAMING_SUBMISSIONS_HASH_ID => {
                        Some(CoreError::not_found("identity", identity_id))
                    }
                    FK_NAMING_SUBMISSIONS_USER_ID => Some(CoreError::not_found("author", author_id)),
                    _ => None,
                })
            })?;

        tracing::info!(
            submission_id = submission.id,
            hash_id = identity_id,
            user_id = author_id,
            "Naming submitted",
        );

        if let Some(metadata) = metadata {
            if let Err(e) = MetadataRepo::create(&self.pool, submission.id, &metadata).await {
                tracing::warn!(
                    submission_id = submission.id,
                    error = %e,
                    "Submission stored without its metadata",
                );
                return Err(classify_write_error(e, |constraint| {
                    (constraint == FK_NAMING_METADATA_SUBMISSION_ID)
                        .then(|| CoreError::not_found("submission", submission.id))
                }));
            }
        }

        Ok(submission)
    }

    /// All namings for a fingerprint, best first. Unknown fingerprints
    /// yield an empty list.
    pub async fn list_namings_for_fingerprint(
        &self,
        fingerprint: &str,
    ) -> EngineResult<Vec<SubmissionWithVotes>> {
        let hash = validate_fingerprint(fingerprint)?;
        let mut submissions = SubmissionRepo::list_with_votes_by_hash(&self.pool, hash).await?;
        self.attach_metadata(&mut submissions).await?;
        order_by_standing(&mut submissions);
        Ok(submissions)
    }

    /// Identity attributes plus ranked namings for a fingerprint.
    pub async fn lookup(&self, fingerprint: &str) -> EngineResult<HashLookup> {
        let hash = validate_fingerprint(fingerprint)?;
        let Some(identity) = FileHashRepo::find_by_hash(&self.pool, hash).await? else {
            tracing::debug!(hash, "Lookup of unknown fingerprint");
            return Ok(HashLookup {
                hash: hash.to_string(),
                file_size: None,
                media_type: None,
                submissions: Vec::new(),
            });
        };

        let submissions = self.list_namings_for_fingerprint(hash).await?;
        Ok(HashLookup {
            media_type: Some(identity.media_kind()?),
            file_size: Some(identity.file_size),
            hash: identity.hash,
            submissions,
        })
    }

    pub async fn submission_by_id(&self, id: DbId) -> EngineResult<SubmissionWithVotes> {
        let mut submission = SubmissionRepo::find_with_votes(&self.pool, id)
            .await?
            .ok_or_else(|| CoreError::not_found("submission", id))?;
        submission.metadata = MetadataRepo::find_by_submission(&self.pool, id).await?;
        Ok(submission)
    }

    /// Fill in `metadata` for each submission with a single query.
    pub(crate) async fn attach_metadata(
        &self,
        submissions: &mut [SubmissionWithVotes],
    ) -> EngineResult<()> {
        let ids: Vec<DbId> = submissions.iter().map(|s| s.id).collect();
        let mut by_submission: HashMap<DbId, _> =
            MetadataRepo::list_by_submissions(&self.pool, &ids)
                .await?
                .into_iter()
                .map(|m| (m.submission_id, m))
                .collect();

        for submission in submissions.iter_mut() {
            submission.metadata = by_submission.remove(&submission.id);
        }
        Ok(())
    }
}

/// Trim text fields and drop the ones left empty.
fn normalize_metadata(metadata: CreateMetadata) -> CreateMetadata {
    fn clean(value: Option<String>) -> Option<String> {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    CreateMetadata {
        title: clean(metadata.title),
        quality: clean(metadata.quality),
        source: clean(metadata.source),
        ..metadata
    }
}
