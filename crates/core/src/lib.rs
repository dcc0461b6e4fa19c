//! Domain logic for the mkvmender naming engine.
//!
//! Everything in this crate is pure: no database access, no network. The
//! `db` crate persists the entities and the `engine` crate wires both
//! together behind the caller-facing surface.

pub mod error;
pub mod fingerprint;
pub mod grouping;
pub mod matching;
pub mod media;
pub mod moderation;
pub mod naming;
pub mod ranking;
pub mod types;
