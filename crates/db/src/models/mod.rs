//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` entity struct matching the database
//! row and the `Deserialize` DTOs used to create or patch it.

pub mod favorite;
pub mod recent_item;
pub mod user;
