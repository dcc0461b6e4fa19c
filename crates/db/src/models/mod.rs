//! Row models and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` struct per table or
//! joined read, plus `Deserialize` create DTOs for inserts.

pub mod file_hash;
pub mod metadata;
pub mod moderation;
pub mod search;
pub mod submission;
pub mod user;
pub mod vote;
