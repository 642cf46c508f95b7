//! Handlers for the recently viewed list.
//!
//! Each user keeps a short history per category; recording a view trims it
//! back to `senpai_core::recent::MAX_RECENT_ITEMS`. All endpoints require
//! authentication.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use senpai_core::category::Category;
use senpai_core::recent;
use senpai_db::models::recent_item::RecordViewRequest;
use senpai_db::repositories::RecentItemRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /recent/{category}
// ---------------------------------------------------------------------------

/// List the caller's recent items in a category, most recent first.
pub async fn list_recent(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> AppResult<impl IntoResponse> {
    let category = Category::parse(&category)?;

    let items = RecentItemRepo::list(&state.pool, auth.user_id, category).await?;

    tracing::debug!(
        user_id = auth.user_id,
        category = %category,
        count = items.len(),
        "Fetched recent items"
    );

    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// POST /recent/{category}
// ---------------------------------------------------------------------------

/// Record a view of an item.
///
/// A repeated view moves the item to the front and refreshes its title and
/// link instead of adding a second entry.
pub async fn record_view(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(category): Path<String>,
    Json(input): Json<RecordViewRequest>,
) -> AppResult<impl IntoResponse> {
    let category = Category::parse(&category)?;
    recent::validate_view(&input.item_id, &input.title, &input.link)?;

    let view = RecordViewRequest {
        item_id: input.item_id.trim().to_string(),
        title: input.title.trim().to_string(),
        link: input.link.trim().to_string(),
    };

    let item = RecentItemRepo::record_view(&state.pool, auth.user_id, category, &view).await?;

    tracing::info!(
        user_id = auth.user_id,
        category = %category,
        item_id = %item.item_id,
        "Recorded view"
    );

    Ok(Json(DataResponse { data: item }))
}

// ---------------------------------------------------------------------------
// DELETE /recent/{category}
// ---------------------------------------------------------------------------

/// Clear the caller's recent items in a category.
pub async fn clear_recent(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> AppResult<impl IntoResponse> {
    let category = Category::parse(&category)?;

    let deleted = RecentItemRepo::clear(&state.pool, auth.user_id, category).await?;

    tracing::info!(
        user_id = auth.user_id,
        category = %category,
        deleted,
        "Cleared recent items"
    );

    Ok(Json(DataResponse { data: deleted }))
}
