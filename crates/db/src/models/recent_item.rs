//! Recently viewed item model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use senpai_core::types::{DbId, Timestamp};

/// A row from the `recent_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecentItem {
    pub id: DbId,
    pub user_id: DbId,
    pub category: String,
    pub item_id: String,
    pub title: String,
    pub link: String,
    pub created_at: Timestamp,
}

/// DTO for recording a view.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordViewRequest {
    pub item_id: String,
    pub title: String,
    pub link: String,
}
