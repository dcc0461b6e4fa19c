//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async operations
//! that accept `&PgPool` as the first argument.

pub mod file_hash_repo;
pub mod metadata_repo;
pub mod moderation_repo;
pub mod search_repo;
pub mod submission_repo;
pub mod user_repo;
pub mod vote_repo;

pub use file_hash_repo::FileHashRepo;
pub use metadata_repo::MetadataRepo;
pub use moderation_repo::ModerationRepo;
pub use search_repo::SearchRepo;
pub use submission_repo::SubmissionRepo;
pub use user_repo::UserRepo;
pub use vote_repo::VoteRepo;
