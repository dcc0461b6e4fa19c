//! Author models.

use mkvmender_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Default role assigned to newly registered authors.
pub const ROLE_USER: &str = "user";

/// Role allowed to moderate submissions.
pub const ROLE_ADMIN: &str = "admin";

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering an author.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub username: String,
    /// Defaults to [`ROLE_USER`].
    pub role: Option<String>,
}
