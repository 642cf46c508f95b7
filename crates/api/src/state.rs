use std::sync::Arc;

use crate::auth::delivery::OtpDelivery;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: senpai_db::DbPool,
    /// Server configuration (JWT settings, OTP lifetime).
    pub config: Arc<ServerConfig>,
    /// Where freshly issued one-time passwords are sent.
    pub otp_delivery: Arc<dyn OtpDelivery>,
}
