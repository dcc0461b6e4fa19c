//! Names of the constraints declared in the migrations.
//!
//! Callers match on these when classifying unique and foreign key
//! violations reported by PostgreSQL.

/// PostgreSQL SQLSTATE for a unique violation.
pub const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL SQLSTATE for a foreign key violation.
pub const FOREIGN_KEY_VIOLATION: &str = "23503";

pub const UQ_USERS_USERNAME: &str = "uq_users_username";
pub const UQ_NAMING_METADATA_SUBMISSION: &str = "uq_naming_metadata_submission";

pub const FK_NAMING_SUBMISSIONS_HASH_ID: &str = "fk_naming_submissions_hash_id";
pub const FK_NAMING_SUBMISSIONS_USER_ID: &str = "fk_naming_submissions_user_id";
pub const FK_NAMING_METADATA_SUBMISSION_ID: &str = "fk_naming_metadata_submission_id";
pub const FK_VOTES_SUBMISSION_ID: &str = "fk_votes_submission_id";
pub const FK_VOTES_USER_ID: &str = "fk_votes_user_id";
