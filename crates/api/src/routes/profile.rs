//! Route definitions for the caller's profile.

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// Routes mounted at `/profile`.
///
/// ```text
/// GET    /                 -> get_profile
/// PUT    /update           -> update_profile
/// PUT    /change-password  -> change_password
/// DELETE /delete           -> delete_account
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(profile::get_profile))
        .route("/update", put(profile::update_profile))
        .route("/change-password", put(profile::change_password))
        .route("/delete", delete(profile::delete_account))
}
