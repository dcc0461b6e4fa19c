//! Integration tests for identities, submissions, votes, and moderation.

mod common;

use assert_matches::assert_matches;
use mkvmender_core::error::CoreError;
use mkvmender_core::media::{MediaKind, VoteDirection};
use mkvmender_db::models::metadata::CreateMetadata;
use mkvmender_db::repositories::{MetadataRepo, VoteRepo};
use mkvmender_engine::admin::AdminListParams;
use mkvmender_engine::EngineError;
use sqlx::PgPool;

use common::{author, engine, identity, movie_meta, propose, votes};

// ---------------------------------------------------------------------------
// Identity registry
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn resolve_is_idempotent_and_first_write_wins(pool: PgPool) {
    let engine = engine(pool);

    let first = engine
        .resolve_or_create_identity("abc", 100, MediaKind::Movie)
        .await
        .unwrap();
    let again = engine
        .resolve_or_create_identity("  abc ", 999, MediaKind::Tv)
        .await
        .unwrap();

    assert_eq!(first.id, again.id);
    assert_eq!(again.file_size, 100);
    assert_eq!(again.media_kind().unwrap(), MediaKind::Movie);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_resolve_yields_one_identity(pool: PgPool) {
    let engine = engine(pool);

    let (a, b, c) = tokio::join!(
        engine.resolve_or_create_identity("race", 1, MediaKind::Movie),
        engine.resolve_or_create_identity("race", 1, MediaKind::Movie),
        engine.resolve_or_create_identity("race", 1, MediaKind::Movie),
    );
    let (a, b, c) = (a.unwrap(), b.unwrap(), c.unwrap());
    assert_eq!(a.id, b.id);
    assert_eq!(b.id, c.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn resolve_rejects_bad_input(pool: PgPool) {
    let engine = engine(pool);

    assert_matches!(
        engine.resolve_or_create_identity("  ", 1, MediaKind::Movie).await,
        Err(EngineError::Core(CoreError::Validation(_)))
    );
    assert_matches!(
        engine.resolve_or_create_identity("abc", -1, MediaKind::Movie).await,
        Err(EngineError::Core(CoreError::Validation(_)))
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_identity_is_not_found(pool: PgPool) {
    let engine = engine(pool);

    assert_matches!(
        engine.identity_by_fingerprint("missing").await,
        Err(EngineError::Core(CoreError::NotFound { entity: "identity", .. }))
    );
    assert!(engine.identity_by_id(77).await.unwrap_err().is_not_found());
}

// ---------------------------------------------------------------------------
// Authors
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_author_is_a_conflict(pool: PgPool) {
    let engine = engine(pool);

    let neo = author(&engine, "neo").await;
    assert_eq!(engine.author_by_username(" neo ").await.unwrap().id, neo.id);
    assert_matches!(
        engine.register_author("neo").await,
        Err(EngineError::Core(CoreError::Conflict(_)))
    );
    assert_matches!(
        engine.register_author("").await,
        Err(EngineError::Core(CoreError::Validation(_)))
    );
}

// ---------------------------------------------------------------------------
// Submission ledger
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn namings_ordered_by_score_then_recency(pool: PgPool) {
    let engine = engine(pool);
    let owner = author(&engine, "owner").await;
    let fh = identity(&engine, "h1", MediaKind::Movie).await;

    // C is oldest with the highest score; B is newer than A at equal score.
    let c = propose(&engine, &fh, &owner, "C.mkv", None).await;
    let a = propose(&engine, &fh, &owner, "A.mkv", None).await;
    let b = propose(&engine, &fh, &owner, "B.mkv", None).await;
    votes(&engine, c.id, "c", 5, VoteDirection::Up).await;
    votes(&engine, a.id, "a", 3, VoteDirection::Up).await;
    votes(&engine, b.id, "b", 3, VoteDirection::Up).await;

    let list = engine.list_namings_for_fingerprint("h1").await.unwrap();
    let ids: Vec<i64> = list.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![c.id, b.id, a.id]);
    assert_eq!(list[0].vote_score, 5);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_fingerprint_lists_nothing(pool: PgPool) {
    let engine = engine(pool);

    assert!(engine.list_namings_for_fingerprint("nope").await.unwrap().is_empty());

    let lookup = engine.lookup("nope").await.unwrap();
    assert!(!lookup.is_known());
    assert!(lookup.submissions.is_empty());
    assert_eq!(lookup.hash, "nope");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn lookup_attaches_metadata(pool: PgPool) {
    let engine = engine(pool);
    let owner = author(&engine, "owner").await;
    let fh = identity(&engine, "h1", MediaKind::Movie).await;
    let with = propose(&engine, &fh, &owner, "Heat (1995).mkv", Some(movie_meta("Heat", 1995))).await;
    let without = propose(&engine, &fh, &owner, "heat.mkv", None).await;

    let lookup = engine.lookup("h1").await.unwrap();
    assert_eq!(lookup.file_size, Some(1_000));
    assert_eq!(lookup.media_type, Some(MediaKind::Movie));
    assert_eq!(lookup.submissions.len(), 2);

    let find = |id: i64| lookup.submissions.iter().find(|s| s.id == id).unwrap();
    assert_eq!(
        find(with.id).metadata.as_ref().and_then(|m| m.title.as_deref()),
        Some("Heat")
    );
    assert!(find(without.id).metadata.is_none());

    let single = engine.submission_by_id(with.id).await.unwrap();
    assert_eq!(single.metadata.unwrap().year, Some(1995));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn propose_validates_before_writing(pool: PgPool) {
    let engine = engine(pool);
    let owner = author(&engine, "owner").await;
    let fh = identity(&engine, "h1", MediaKind::Tv).await;

    let bad_season = CreateMetadata {
        title: Some("Show".into()),
        season: Some(-1),
        ..Default::default()
    };
    assert_matches!(
        engine.propose_naming(fh.id, owner.id, "Show.mkv", Some(bad_season)).await,
        Err(EngineError::Core(CoreError::Validation(_)))
    );
    assert_matches!(
        engine.propose_naming(fh.id, owner.id, "   ", None).await,
        Err(EngineError::Core(CoreError::Validation(_)))
    );
    assert!(engine.list_namings_for_fingerprint("h1").await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn failed_metadata_write_keeps_the_submission(pool: PgPool) {
    sqlx::query(
        "ALTER TABLE naming_metadata ADD CONSTRAINT ck_naming_metadata_title_test \
         CHECK (title <> 'Rejected')",
    )
    .execute(&pool)
    .await
    .unwrap();

    let engine = engine(pool);
    let owner = author(&engine, "owner").await;
    let fh = identity(&engine, "h1", MediaKind::Movie).await;

    let result = engine
        .propose_naming(fh.id, owner.id, "Rejected (2001).mkv", Some(movie_meta("Rejected", 2001)))
        .await;
    assert_matches!(result, Err(EngineError::StoreUnavailable(_)));

    let list = engine.list_namings_for_fingerprint("h1").await.unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].filename, "Rejected (2001).mkv");
    assert!(list[0].metadata.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn propose_against_missing_rows_is_not_found(pool: PgPool) {
    let engine = engine(pool);
    let owner = author(&engine, "owner").await;
    let fh = identity(&engine, "h1", MediaKind::Movie).await;

    assert_matches!(
        engine.propose_naming(9_999, owner.id, "x.mkv", None).await,
        Err(EngineError::Core(CoreError::NotFound { entity: "identity", .. }))
    );
    assert_matches!(
        engine.propose_naming(fh.id, 9_999, "x.mkv", None).await,
        Err(EngineError::Core(CoreError::NotFound { entity: "author", .. }))
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_proposals_are_allowed(pool: PgPool) {
    let engine = engine(pool);
    let owner = author(&engine, "owner").await;
    let fh = identity(&engine, "h1", MediaKind::Movie).await;

    propose(&engine, &fh, &owner, "Same.mkv", None).await;
    propose(&engine, &fh, &owner, "Same.mkv", None).await;
    assert_eq!(engine.list_namings_for_fingerprint("h1").await.unwrap().len(), 2);
}

// ---------------------------------------------------------------------------
// Votes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn flipping_a_vote_keeps_one_row(pool: PgPool) {
    let engine = engine(pool.clone());
    let owner = author(&engine, "owner").await;
    let voter = author(&engine, "voter").await;
    let fh = identity(&engine, "h1", MediaKind::Movie).await;
    let sub = propose(&engine, &fh, &owner, "a.mkv", None).await;

    let up = engine.cast_vote(sub.id, voter.id, VoteDirection::Up).await.unwrap();
    assert_eq!((up.upvotes, up.downvotes, up.score), (1, 0, 1));

    let down = engine.cast_vote(sub.id, voter.id, VoteDirection::Down).await.unwrap();
    assert_eq!((down.upvotes, down.downvotes, down.score), (0, 1, -1));

    let tally = engine.tally(sub.id).await.unwrap();
    assert_eq!(tally, down);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM votes WHERE submission_id = $1")
        .bind(sub.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_identical_votes_leave_one_row(pool: PgPool) {
    let engine = engine(pool.clone());
    let owner = author(&engine, "owner").await;
    let voter = author(&engine, "voter").await;
    let fh = identity(&engine, "h1", MediaKind::Movie).await;
    let sub = propose(&engine, &fh, &owner, "a.mkv", None).await;

    let (a, b) = tokio::join!(
        engine.cast_vote(sub.id, voter.id, VoteDirection::Up),
        engine.cast_vote(sub.id, voter.id, VoteDirection::Up),
    );
    a.unwrap();
    b.unwrap();

    let tally = engine.tally(sub.id).await.unwrap();
    assert_eq!((tally.upvotes, tally.score), (1, 1));
    assert!(VoteRepo::find(&pool, sub.id, voter.id).await.unwrap().is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn vote_errors(pool: PgPool) {
    let engine = engine(pool);
    let owner = author(&engine, "owner").await;
    let fh = identity(&engine, "h1", MediaKind::Movie).await;
    let sub = propose(&engine, &fh, &owner, "a.mkv", None).await;

    assert_matches!(
        engine.cast_vote(4_242, owner.id, VoteDirection::Up).await,
        Err(EngineError::Core(CoreError::NotFound { entity: "submission", .. }))
    );
    assert_matches!(
        engine.cast_vote_value(sub.id, owner.id, 2).await,
        Err(EngineError::Core(CoreError::Validation(_)))
    );
    assert_matches!(
        engine.retract_vote(sub.id, owner.id).await,
        Err(EngineError::Core(CoreError::NotFound { entity: "vote", .. }))
    );
    assert_matches!(
        engine.tally(4_242).await,
        Err(EngineError::Core(CoreError::NotFound { entity: "submission", .. }))
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn retract_removes_the_vote(pool: PgPool) {
    let engine = engine(pool);
    let owner = author(&engine, "owner").await;
    let fh = identity(&engine, "h1", MediaKind::Movie).await;
    let sub = propose(&engine, &fh, &owner, "a.mkv", None).await;

    engine.cast_vote_value(sub.id, owner.id, 1).await.unwrap();
    engine.retract_vote(sub.id, owner.id).await.unwrap();

    let tally = engine.tally(sub.id).await.unwrap();
    assert_eq!((tally.upvotes, tally.downvotes, tally.score), (0, 0, 0));
}

// ---------------------------------------------------------------------------
// Moderation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn removal_cascades_and_is_logged(pool: PgPool) {
    let engine = engine(pool.clone());
    let admin = engine.register_admin("admin").await.unwrap();
    let owner = author(&engine, "owner").await;
    let fh = identity(&engine, "h1", MediaKind::Movie).await;
    let sub = propose(&engine, &fh, &owner, "a.mkv", Some(movie_meta("Heat", 1995))).await;
    engine.cast_vote(sub.id, owner.id, VoteDirection::Up).await.unwrap();

    engine
        .remove_submission(sub.id, admin.id, Some(" spam "))
        .await
        .unwrap();

    assert!(MetadataRepo::find_by_submission(&pool, sub.id).await.unwrap().is_none());
    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM votes WHERE submission_id = $1")
        .bind(sub.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);

    assert_matches!(
        engine.remove_submission(sub.id, admin.id, None).await,
        Err(EngineError::Core(CoreError::NotFound { entity: "submission", .. }))
    );

    let log = engine.moderation_log(None).await.unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].target_id, sub.id);
    assert_eq!(log[0].action_type, "delete_submission");
    assert_eq!(log[0].reason.as_deref(), Some("spam"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn audit_failure_does_not_fail_removal(pool: PgPool) {
    let engine = engine(pool);
    let owner = author(&engine, "owner").await;
    let fh = identity(&engine, "h1", MediaKind::Movie).await;
    let sub = propose(&engine, &fh, &owner, "a.mkv", None).await;

    // No such admin: the audit insert violates its foreign key.
    engine.remove_submission(sub.id, 9_999, None).await.unwrap();

    assert!(engine.submission_by_id(sub.id).await.unwrap_err().is_not_found());
    assert!(engine.moderation_log(Some(10)).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_listing_and_stats(pool: PgPool) {
    let engine = engine(pool);
    let alice = author(&engine, "alice").await;
    let bob = author(&engine, "bob").await;
    let fh = identity(&engine, "h1", MediaKind::Movie).await;
    propose(&engine, &fh, &alice, "Zulu.mkv", Some(movie_meta("Zulu", 1964))).await;
    propose(&engine, &fh, &alice, "Alien.mkv", Some(movie_meta("Alien", 1979))).await;
    let bobs = propose(&engine, &fh, &bob, "b.mkv", None).await;
    engine.cast_vote(bobs.id, alice.id, VoteDirection::Up).await.unwrap();

    let by_title = engine
        .list_submissions_admin(&AdminListParams {
            sort: Some("title".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_title.total, 3);
    assert_eq!(by_title.limit, 50);
    let names: Vec<&str> = by_title.items.iter().map(|s| s.filename.as_str()).collect();
    assert_eq!(names, vec!["Alien.mkv", "Zulu.mkv", "b.mkv"]);
    assert!(by_title.items[0].metadata.is_some());

    let alices = engine
        .list_submissions_admin(&AdminListParams {
            user_id: Some(alice.id),
            limit: Some(1),
            page: Some(2),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(alices.total, 2);
    assert_eq!(alices.items.len(), 1);
    assert_eq!(alices.items[0].filename, "Zulu.mkv");

    let far_page = engine
        .list_submissions_admin(&AdminListParams {
            page: Some(i64::MAX),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(far_page.total, 3);
    assert_eq!(far_page.page, i64::MAX);
    assert!(far_page.items.is_empty());

    let stats = engine.admin_stats().await.unwrap();
    assert_eq!(stats.total_users, 2);
    assert_eq!(stats.total_submissions, 3);
    assert_eq!(stats.total_votes, 1);
}
