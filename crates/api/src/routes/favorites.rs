//! Route definitions for saved favorites.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::favorites;
use crate::state::AppState;

/// Routes mounted at `/favorites`.
///
/// ```text
/// GET    /{category}            -> list_favorites
/// POST   /{category}            -> add_favorite
/// DELETE /{category}/{item_id}  -> remove_favorite
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{category}",
            get(favorites::list_favorites).post(favorites::add_favorite),
        )
        .route("/{category}/{item_id}", delete(favorites::remove_favorite))
}
