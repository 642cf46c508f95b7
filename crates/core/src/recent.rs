//! Bounded recently-viewed history rules.
//!
//! Each (user, category) pair keeps at most [`MAX_RECENT_ITEMS`] rows. A view
//! of an item that is already present replaces the old row, so the list never
//! contains the same item twice and the re-viewed item moves to the front.

use crate::error::CoreError;
use crate::validation::require_non_blank;

/// Maximum number of recent items kept per user and category.
pub const MAX_RECENT_ITEMS: i64 = 4;

/// Number of oldest rows to purge when `count` rows exist after an insert.
pub fn overflow(count: i64) -> i64 {
    (count - MAX_RECENT_ITEMS).max(0)
}

/// Validate the fields of a view before it is recorded.
///
/// `link` is the category-specific target: the page url for anime, the
/// store slug for games and the audio url for music.
pub fn validate_view(item_id: &str, title: &str, link: &str) -> Result<(), CoreError> {
    require_non_blank("item_id", item_id)?;
    require_non_blank("title", title)?;
    require_non_blank("link", link)?;
    Ok(())
}
