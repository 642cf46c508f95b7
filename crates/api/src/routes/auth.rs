//! Route definitions for the `/auth` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /signup            -> signup
/// POST /verify-otp        -> verify_otp
/// POST /login             -> login
/// POST /request-reset     -> request_reset
/// POST /verify-reset-otp  -> verify_reset_otp
/// POST /reset-password    -> reset_password
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/verify-otp", post(auth::verify_otp))
        .route("/login", post(auth::login))
        .route("/request-reset", post(auth::request_reset))
        .route("/verify-reset-otp", post(auth::verify_reset_otp))
        .route("/reset-password", post(auth::reset_password))
}
