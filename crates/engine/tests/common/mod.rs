#![allow(dead_code)]

use mkvmender_core::media::{MediaKind, VoteDirection};
use mkvmender_db::models::file_hash::FileHash;
use mkvmender_db::models::metadata::CreateMetadata;
use mkvmender_db::models::submission::NamingSubmission;
use mkvmender_db::models::user::User;
use mkvmender_engine::telemetry::{init_tracing, LogFormat};
use mkvmender_engine::NamingEngine;
use sqlx::PgPool;

pub fn engine(pool: PgPool) -> NamingEngine {
    init_tracing(LogFormat::Text);
    NamingEngine::new(pool)
}

pub async fn author(engine: &NamingEngine, username: &str) -> User {
    engine.register_author(username).await.unwrap()
}

pub async fn identity(engine: &NamingEngine, hash: &str, kind: MediaKind) -> FileHash {
    engine
        .resolve_or_create_identity(hash, 1_000, kind)
        .await
        .unwrap()
}

pub async fn propose(
    engine: &NamingEngine,
    identity: &FileHash,
    author: &User,
    name: &str,
    metadata: Option<CreateMetadata>,
) -> NamingSubmission {
    engine
        .propose_naming(identity.id, author.id, name, metadata)
        .await
        .unwrap()
}

pub fn movie_meta(title: &str, year: i32) -> CreateMetadata {
    CreateMetadata {
        title: Some(title.to_string()),
        year: Some(year),
        ..Default::default()
    }
}

pub fn episode_meta(title: &str, season: i32, episode: i32) -> CreateMetadata {
    CreateMetadata {
        title: Some(title.to_string()),
        season: Some(season),
        episode: Some(episode),
        ..Default::default()
    }
}

/// Register `count` fresh authors and have each of them vote `direction`.
pub async fn votes(
    engine: &NamingEngine,
    submission_id: i64,
    prefix: &str,
    count: usize,
    direction: VoteDirection,
) {
    for i in 0..count {
        let voter = author(engine, &format!("{prefix}-{i}")).await;
        engine
            .cast_vote(submission_id, voter.id, direction)
            .await
            .unwrap();
    }
}
