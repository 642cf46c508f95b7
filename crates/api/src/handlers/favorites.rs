//! Handlers for saved favorites.
//!
//! Anime, games and music share one set of endpoints keyed by the
//! `{category}` path segment. All endpoints require authentication.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use senpai_core::category::Category;
use senpai_core::error::CoreError;
use senpai_core::favorites;
use senpai_db::models::favorite::CreateFavorite;
use senpai_db::repositories::FavoriteRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Result of a remove request.
#[derive(Debug, Serialize)]
pub struct RemovedResponse {
    /// `false` when nothing matched (the item was not saved).
    pub removed: bool,
}

// ---------------------------------------------------------------------------
// GET /favorites/{category}
// ---------------------------------------------------------------------------

/// List the caller's favorites in a category, oldest first.
pub async fn list_favorites(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> AppResult<impl IntoResponse> {
    let category = Category::parse(&category)?;

    let items = FavoriteRepo::list(&state.pool, auth.user_id, category).await?;

    tracing::debug!(
        user_id = auth.user_id,
        category = %category,
        count = items.len(),
        "Fetched favorites"
    );

    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// POST /favorites/{category}
// ---------------------------------------------------------------------------

/// Save an item to the caller's favorites.
///
/// Saving the same item twice in a category is rejected with 409.
pub async fn add_favorite(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(category): Path<String>,
    Json(input): Json<CreateFavorite>,
) -> AppResult<impl IntoResponse> {
    let category = Category::parse(&category)?;

    let metadata = favorites::normalize_favorite(
        category,
        &input.item_id,
        &input.title,
        input.image.as_deref(),
        &input.metadata,
    )?;

    let normalized = CreateFavorite {
        item_id: input.item_id.trim().to_string(),
        title: input.title.trim().to_string(),
        image: input
            .image
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty()),
        metadata,
    };

    if FavoriteRepo::exists(&state.pool, auth.user_id, category, &normalized.item_id).await? {
        return Err(AppError::Core(CoreError::Conflict("Already saved".into())));
    }

    // A concurrent duplicate still trips `uq_favorites_user_category_item`.
    let favorite = FavoriteRepo::create(&state.pool, auth.user_id, category, &normalized).await?;

    tracing::info!(
        user_id = auth.user_id,
        category = %category,
        item_id = %favorite.item_id,
        "Saved favorite"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: favorite })))
}

// ---------------------------------------------------------------------------
// DELETE /favorites/{category}/{item_id}
// ---------------------------------------------------------------------------

/// Remove an item from the caller's favorites. Removing an item that is not
/// saved succeeds with `removed: false`.
pub async fn remove_favorite(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((category, item_id)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let category = Category::parse(&category)?;

    let removed = FavoriteRepo::delete(&state.pool, auth.user_id, category, item_id.trim()).await?;

    tracing::info!(
        user_id = auth.user_id,
        category = %category,
        item_id = %item_id,
        removed,
        "Removed favorite"
    );

    Ok(Json(DataResponse {
        data: RemovedResponse { removed },
    }))
}
