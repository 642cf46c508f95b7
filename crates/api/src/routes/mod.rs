pub mod auth;
pub mod favorites;
pub mod health;
pub mod profile;
pub mod recent;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                    register, send OTP (public)
/// /auth/verify-otp                verify account (public)
/// /auth/login                     login (public)
/// /auth/request-reset             send password reset OTP (public)
/// /auth/verify-reset-otp          check reset OTP (public)
/// /auth/reset-password            set new password (public)
///
/// /favorites/{category}           list, add
/// /favorites/{category}/{item_id} remove
///
/// /recent/{category}              list, record view, clear
///
/// /profile                        get
/// /profile/update                 update (PUT)
/// /profile/change-password        change password (PUT)
/// /profile/delete                 delete account (DELETE)
/// ```
///
/// Everything outside `/auth` requires a Bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/favorites", favorites::router())
        .nest("/recent", recent::router())
        .nest("/profile", profile::router())
}
