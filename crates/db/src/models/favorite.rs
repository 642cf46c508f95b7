//! Favorite entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use senpai_core::types::{DbId, Timestamp};

/// A row from the `favorites` table.
///
/// `metadata` holds the category-specific payload (rating, artist, audio url)
/// as normalized by `senpai_core::favorites::normalize_favorite`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Favorite {
    pub id: DbId,
    pub user_id: DbId,
    pub category: String,
    pub item_id: String,
    pub title: String,
    pub image: Option<String>,
    pub metadata: serde_json::Value,
    pub created_at: Timestamp,
}

/// DTO for saving a favorite. The owner and category come from the request
/// context, not the body.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFavorite {
    pub item_id: String,
    pub title: String,
    pub image: Option<String>,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

/// Per-category favorite counts for a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FavoriteCounts {
    pub anime: i64,
    pub games: i64,
    pub music: i64,
}
