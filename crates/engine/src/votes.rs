//! Vote aggregator: at most one vote per author per submission.

use mkvmender_core::error::CoreError;
use mkvmender_core::media::VoteDirection;
use mkvmender_core::types::DbId;
use mkvmender_db::constraints::{FK_VOTES_SUBMISSION_ID, FK_VOTES_USER_ID};
use mkvmender_db::models::submission::VoteTally;
use mkvmender_db::repositories::{SubmissionRepo, VoteRepo};

use crate::error::{classify_write_error, EngineResult};
use crate::NamingEngine;

impl NamingEngine {
    /// Cast or change a vote and return the submission's fresh tally.
    pub async fn cast_vote(
        &self,
        submission_id: DbId,
        author_id: DbId,
        direction: VoteDirection,
    ) -> EngineResult<VoteTally> {
        VoteRepo::upsert(&self.pool, submission_id, author_id, direction)
            .await
            .map_err(|e| {
                classify_write_error(e, |constraint| match constraint {
                    FK_VOTES_SUBMISSION_ID => Some(CoreError::not_found("submission", submission_id)),
                    FK_VOTES_USER_ID => Some(CoreError::not_found("author", author_id)),
                    _ => None,
                })
            })?;

        tracing::info!(
            submission_id,
            user_id = author_id,
            vote = direction.value(),
            "Vote cast",
        );

        Ok(VoteRepo::tally(&self.pool, submission_id).await?)
    }

    /// Cast a vote given as a raw `1` / `-1`.
    pub async fn cast_vote_value(
        &self,
        submission_id: DbId,
        author_id: DbId,
        value: i16,
    ) -> EngineResult<VoteTally> {
        let direction = VoteDirection::from_value(value)?;
        self.cast_vote(submission_id, author_id, direction).await
    }

    /// Remove an author's vote. Fails with `NotFound` if they had none.
    pub async fn retract_vote(&self, submission_id: DbId, author_id: DbId) -> EngineResult<()> {
        if !VoteRepo::delete(&self.pool, submission_id, author_id).await? {
            return Err(
                CoreError::not_found("vote", format!("{submission_id}/{author_id}")).into(),
            );
        }

        tracing::info!(submission_id, user_id = author_id, "Vote retracted");
        Ok(())
    }

    /// Current counts, read from the store on every call.
    pub async fn tally(&self, submission_id: DbId) -> EngineResult<VoteTally> {
        let tally = VoteRepo::tally(&self.pool, submission_id).await?;
        if tally.upvotes + tally.downvotes == 0
            && SubmissionRepo::find_by_id(&self.pool, submission_id)
                .await?
                .is_none()
        {
            return Err(CoreError::not_found("submission", submission_id).into());
        }
        Ok(tally)
    }
}
