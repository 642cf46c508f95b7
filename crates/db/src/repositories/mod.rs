//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` as the first argument.

pub mod favorite_repo;
pub mod recent_item_repo;
pub mod user_repo;

pub use favorite_repo::FavoriteRepo;
pub use recent_item_repo::RecentItemRepo;
pub use user_repo::UserRepo;
