//! Moderation and admin reporting.
//!
//! Authorization is the caller's job: these operations assume the acting
//! author has already been checked.

use mkvmender_core::error::CoreError;
use mkvmender_core::moderation::{
    clamp_page, clamp_page_size, AdminSort, ACTION_DELETE_SUBMISSION, DEFAULT_ADMIN_PAGE_SIZE,
    DEFAULT_MODERATION_LOG_LIMIT, MAX_ADMIN_PAGE_SIZE, MAX_MODERATION_LOG_LIMIT,
    TARGET_SUBMISSION,
};
use mkvmender_core::types::DbId;
use mkvmender_db::models::moderation::{
    AdminStats, AdminSubmissionQuery, CreateModerationAction, ModerationAction, SubmissionPage,
};
use mkvmender_db::repositories::{ModerationRepo, SubmissionRepo};
use serde::Deserialize;

use crate::error::EngineResult;
use crate::NamingEngine;

/// Raw listing parameters as a caller would pass them. Out-of-range values
/// are clamped rather than rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub user_id: Option<DbId>,
    pub sort: Option<String>,
}

impl AdminListParams {
    fn resolve(&self) -> AdminSubmissionQuery {
        AdminSubmissionQuery {
            page: clamp_page(self.page),
            limit: clamp_page_size(self.limit, DEFAULT_ADMIN_PAGE_SIZE, MAX_ADMIN_PAGE_SIZE),
            user_id: self.user_id,
            sort: self
                .sort
                .as_deref()
                .map(AdminSort::parse_or_default)
                .unwrap_or_default(),
        }
    }
}

impl NamingEngine {
    /// Delete a submission with its votes and metadata, then record the
    /// action in the moderation log.
    ///
    /// The log entry is best effort: failing to write it is logged and does
    /// not fail the call.
    pub async fn remove_submission(
        &self,
        submission_id: DbId,
        admin_id: DbId,
        reason: Option<&str>,
    ) -> EngineResult<()> {
        if !SubmissionRepo::delete(&self.pool, submission_id).await? {
            return Err(CoreError::not_found("submission", submission_id).into());
        }
        tracing::info!(submission_id, admin_id, "Submission deleted");

        let action = CreateModerationAction {
            admin_id,
            action_type: ACTION_DELETE_SUBMISSION.to_string(),
            target_type: TARGET_SUBMISSION.to_string(),
            target_id: submission_id,
            reason: reason
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(str::to_string),
        };
        if let Err(e) = ModerationRepo::log_action(&self.pool, &action).await {
            tracing::warn!(
                submission_id,
                admin_id,
                error = %e,
                "Failed to record moderation action",
            );
        }
        Ok(())
    }

    /// One page of submissions for moderation, with metadata attached.
    pub async fn list_submissions_admin(
        &self,
        params: &AdminListParams,
    ) -> EngineResult<SubmissionPage> {
        let query = params.resolve();
        let mut items = SubmissionRepo::admin_list(&self.pool, &query).await?;
        self.attach_metadata(&mut items).await?;
        let total = SubmissionRepo::admin_count(&self.pool, query.user_id).await?;

        Ok(SubmissionPage {
            items,
            total,
            page: query.page,
            limit: query.limit,
        })
    }

    pub async fn admin_stats(&self) -> EngineResult<AdminStats> {
        Ok(ModerationRepo::stats(&self.pool).await?)
    }

    /// Recent moderation actions, newest first.
    pub async fn moderation_log(&self, limit: Option<i64>) -> EngineResult<Vec<ModerationAction>> {
        let limit = clamp_page_size(limit, DEFAULT_MODERATION_LOG_LIMIT, MAX_MODERATION_LOG_LIMIT);
        Ok(ModerationRepo::list_recent(&self.pool, limit).await?)
    }
}
