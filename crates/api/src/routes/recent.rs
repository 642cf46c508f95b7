//! Route definitions for recently viewed items.

use axum::routing::get;
use axum::Router;

use crate::handlers::recent;
use crate::state::AppState;

/// Routes mounted at `/recent`.
///
/// ```text
/// GET    /{category}  -> list_recent
/// POST   /{category}  -> record_view
/// DELETE /{category}  -> clear_recent
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{category}",
        get(recent::list_recent)
            .post(recent::record_view)
            .delete(recent::clear_recent),
    )
}
