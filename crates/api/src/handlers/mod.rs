//! Request handlers.
//!
//! Each submodule provides the async handler functions for one resource.
//! Handlers delegate persistence to the repositories in `senpai_db` and map
//! errors via [`AppError`](crate::error::AppError).

pub mod auth;
pub mod favorites;
pub mod profile;
pub mod recent;
