//! Author registration. Credentials are handled elsewhere.

use mkvmender_core::error::CoreError;
use mkvmender_core::naming::validate_username;
use mkvmender_core::types::DbId;
use mkvmender_db::models::user::{CreateUser, User, ROLE_ADMIN};
use mkvmender_db::repositories::UserRepo;

use crate::error::{classify_write_error, EngineResult};
use crate::NamingEngine;

impl NamingEngine {
    /// Register an author. A taken username is a [`CoreError::Conflict`].
    pub async fn register_author(&self, username: &str) -> EngineResult<User> {
        self.create_user(username, None).await
    }

    /// Register an author with the admin role.
    pub async fn register_admin(&self, username: &str) -> EngineResult<User> {
        self.create_user(username, Some(ROLE_ADMIN)).await
    }

    pub async fn author_by_username(&self, username: &str) -> EngineResult<User> {
        let username = validate_username(username)?;
        UserRepo::find_by_username(&self.pool, username)
            .await?
            .ok_or_else(|| CoreError::not_found("author", username).into())
    }

    pub async fn author_by_id(&self, id: DbId) -> EngineResult<User> {
        UserRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| CoreError::not_found("author", id).into())
    }

    async fn create_user(&self, username: &str, role: Option<&str>) -> EngineResult<User> {
        let username = validate_username(username)?;
        let input = CreateUser {
            username: username.to_string(),
            role: role.map(str::to_string),
        };
        let user = UserRepo::create(&self.pool, &input)
            .await
            .map_err(|e| classify_write_error(e, |_| None))?;

        tracing::info!(user_id = user.id, username = %user.username, role = %user.role, "Author registered");
        Ok(user)
    }
}
