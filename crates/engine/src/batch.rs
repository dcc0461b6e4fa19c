//! Batch rename previews for a set of local media files.
//!
//! Each file is fingerprinted on the blocking pool, looked up, and paired
//! with the name its best submission proposes. Nothing is renamed here.

use std::path::{Path, PathBuf};

use mkvmender_core::error::CoreError;
use mkvmender_core::fingerprint::{fingerprint_file, fingerprint_file_partial, FileFingerprint};
use mkvmender_core::naming::{apply_original_extension, is_media_file, DEFAULT_MEDIA_EXTENSIONS};
use mkvmender_core::types::DbId;
use serde::Serialize;

use crate::error::{EngineError, EngineResult};
use crate::NamingEngine;

/// How files are selected and fingerprinted.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Extensions with leading dot; matched case-insensitively.
    pub extensions: Vec<String>,
    /// Hash only the head and tail of each file.
    pub partial: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_MEDIA_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            partial: false,
        }
    }
}

/// What would happen to one file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PreviewOutcome {
    Rename {
        target: PathBuf,
        submission_id: DbId,
        vote_score: i64,
    },
    /// The best naming is already the file's name.
    AlreadyNamed { submission_id: DbId },
    NoSubmissions,
    Failed { error: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct RenamePreview {
    pub source: PathBuf,
    pub fingerprint: Option<FileFingerprint>,
    pub outcome: PreviewOutcome,
}

impl RenamePreview {
    fn failed(source: PathBuf, fingerprint: Option<FileFingerprint>, error: EngineError) -> Self {
        Self {
            source,
            fingerprint,
            outcome: PreviewOutcome::Failed {
                error: error.to_string(),
            },
        }
    }
}

impl NamingEngine {
    /// Preview renames for `paths`.
    ///
    /// Paths without a selected extension are skipped. A failure on one file
    /// is recorded in its entry and never aborts the rest of the batch.
    pub async fn preview_batch(
        &self,
        paths: &[PathBuf],
        options: &BatchOptions,
    ) -> Vec<RenamePreview> {
        let mut previews = Vec::new();

        for path in paths {
            if !is_media_file(path, &options.extensions) {
                tracing::debug!(path = %path.display(), "Skipping non-media file");
                continue;
            }

            let fingerprint = match self.fingerprint(path, options.partial).await {
                Ok(fingerprint) => fingerprint,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to fingerprint file");
                    previews.push(RenamePreview::failed(path.clone(), None, e));
                    continue;
                }
            };

            let preview = match self.list_namings_for_fingerprint(&fingerprint.hash).await {
                Ok(submissions) => {
                    let outcome = match submissions.first() {
                        None => PreviewOutcome::NoSubmissions,
                        Some(best) => {
                            let target = apply_original_extension(path, &best.filename);
                            if target == *path {
                                PreviewOutcome::AlreadyNamed {
                                    submission_id: best.id,
                                }
                            } else {
                                PreviewOutcome::Rename {
                                    target,
                                    submission_id: best.id,
                                    vote_score: best.vote_score,
                                }
                            }
                        }
                    };
                    RenamePreview {
                        source: path.clone(),
                        fingerprint: Some(fingerprint),
                        outcome,
                    }
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to look up file");
                    RenamePreview::failed(path.clone(), Some(fingerprint), e)
                }
            };
            previews.push(preview);
        }

        tracing::info!(
            requested = paths.len(),
            previewed = previews.len(),
            "Batch preview complete"
        );
        previews
    }

    /// Fingerprint a file on the blocking pool.
    pub async fn fingerprint(&self, path: &Path, partial: bool) -> EngineResult<FileFingerprint> {
        let path = path.to_path_buf();
        let chunk_bytes = self.partial_hash_chunk_bytes;

        tokio::task::spawn_blocking(move || {
            if partial {
                fingerprint_file_partial(&path, chunk_bytes)
            } else {
                fingerprint_file(&path)
            }
        })
        .await
        .map_err(|e| CoreError::Internal(format!("Fingerprint task failed: {e}")))?
        .map_err(EngineError::from)
    }
}

/// Media files directly inside `dir`, or anywhere below it when `recursive`.
///
/// Sorted by path so previews come out in a stable order.
pub async fn scan_media_files(
    dir: &Path,
    options: &BatchOptions,
    recursive: bool,
) -> EngineResult<Vec<PathBuf>> {
    let dir = dir.to_path_buf();
    let extensions = options.extensions.clone();

    let mut files = tokio::task::spawn_blocking(move || {
        let mut files = Vec::new();
        collect_media_files(&dir, &extensions, recursive, &mut files).map(|()| files)
    })
    .await
    .map_err(|e| CoreError::Internal(format!("Directory scan task failed: {e}")))??;

    files.sort();
    Ok(files)
}

fn collect_media_files(
    dir: &Path,
    extensions: &[String],
    recursive: bool,
    out: &mut Vec<PathBuf>,
) -> std::io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            if recursive {
                collect_media_files(&path, extensions, recursive, out)?;
            }
        } else if is_media_file(&path, extensions) {
            out.push(path);
        }
    }
    Ok(())
}
