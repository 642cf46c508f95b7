//! Handlers for the `/auth` resource (signup, OTP verification, login,
//! password reset).

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

use senpai_core::error::CoreError;
use senpai_core::otp;
use senpai_core::validation::{require_non_blank, validate_input};
use senpai_db::models::user::{CreateUser, User, UserResponse};
use senpai_db::repositories::UserRepo;

use crate::auth::delivery::OtpPurpose;
use crate::auth::password::{check_strength, hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::response::MessageResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup`.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Request body for `POST /auth/verify-otp` and `POST /auth/verify-reset-otp`.
#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/request-reset`.
#[derive(Debug, Deserialize)]
pub struct RequestResetRequest {
    pub email: String,
}

/// Request body for `POST /auth/reset-password`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub otp: String,
    pub new_password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/signup
///
/// Register an unverified account and send it a verification code. A stale
/// unverified registration for the same email is replaced.
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupRequest>,
) -> AppResult<Json<MessageResponse>> {
    let input = SignupRequest {
        email: normalize_email(&input.email),
        ..input
    };
    validate_input(&input)?;
    require_non_blank("username", &input.username)?;
    check_strength(&input.password)?;

    if let Some(existing) = UserRepo::find_by_email(&state.pool, &input.email).await? {
        if existing.is_verified {
            return Err(AppError::Core(CoreError::Conflict(
                "Email already exists".into(),
            )));
        }
        UserRepo::delete_unverified_by_email(&state.pool, &input.email).await?;
        tracing::info!(user_id = existing.id, "Replacing unverified registration");
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let issued = otp::issue(Utc::now(), state.config.otp_expiry_mins);

    // Deliver first so an undeliverable address leaves nothing behind.
    send_otp(&state, &input.email, &issued.code, OtpPurpose::Signup).await?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email: input.email,
            username: input.username.trim().to_string(),
            password_hash,
            otp_hash: issued.hash,
            otp_expires_at: issued.expires_at,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User signed up, awaiting verification");

    Ok(Json(MessageResponse::new(
        "OTP sent to email. Please verify your account.",
    )))
}

/// POST /api/v1/auth/verify-otp
///
/// Verify the account with the code sent at signup.
pub async fn verify_otp(
    State(state): State<AppState>,
    Json(input): Json<VerifyOtpRequest>,
) -> AppResult<Json<MessageResponse>> {
    let user = find_user_by_email(&state, &input.email).await?;

    if !otp_matches(&user, &input.otp) {
        return Err(AppError::Core(CoreError::Validation("Invalid OTP".into())));
    }

    UserRepo::mark_verified(&state.pool, user.id).await?;
    tracing::info!(user_id = user.id, "Email verified");

    Ok(Json(MessageResponse::new("Email verified successfully")))
}

/// POST /api/v1/auth/login
///
/// Authenticate a verified account with email + password and issue a token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let user = find_user_by_email(&state, &input.email).await?;

    if !user.is_verified {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Please verify your email first".into(),
        )));
    }

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        tracing::info!(user_id = user.id, "Login rejected: bad password");
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid credentials".into(),
        )));
    }

    let token = state
        .config
        .jwt
        .issue(user.id, &user.username)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(LoginResponse {
        token,
        expires_in: state.config.jwt.expires_in_secs(),
        user: UserResponse::from(&user),
    }))
}

/// POST /api/v1/auth/request-reset
///
/// Issue a password reset code. Any previously issued code stops working.
pub async fn request_reset(
    State(state): State<AppState>,
    Json(input): Json<RequestResetRequest>,
) -> AppResult<Json<MessageResponse>> {
    let user = find_user_by_email(&state, &input.email).await?;

    let issued = otp::issue(Utc::now(), state.config.otp_expiry_mins);
    send_otp(&state, &user.email, &issued.code, OtpPurpose::PasswordReset).await?;
    UserRepo::set_otp(&state.pool, user.id, &issued.hash, issued.expires_at).await?;

    tracing::info!(user_id = user.id, "Password reset requested");

    Ok(Json(MessageResponse::new("OTP sent for password reset")))
}

/// POST /api/v1/auth/verify-reset-otp
///
/// Check a reset code without consuming it.
pub async fn verify_reset_otp(
    State(state): State<AppState>,
    Json(input): Json<VerifyOtpRequest>,
) -> AppResult<Json<MessageResponse>> {
    let user = find_user_by_email(&state, &input.email).await?;

    if !otp_matches(&user, &input.otp) {
        return Err(AppError::Core(CoreError::Validation("Invalid OTP".into())));
    }

    Ok(Json(MessageResponse::new("OTP matched")))
}

/// POST /api/v1/auth/reset-password
///
/// Replace the password. The reset code must still be valid; it is consumed.
pub async fn reset_password(
    State(state): State<AppState>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    let user = find_user_by_email(&state, &input.email).await?;

    if !otp_matches(&user, &input.otp) {
        return Err(AppError::Core(CoreError::Validation("Invalid OTP".into())));
    }

    check_strength(&input.new_password)?;

    let password_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    UserRepo::reset_password(&state.pool, user.id, &password_hash).await?;
    tracing::info!(user_id = user.id, "Password reset completed");

    Ok(Json(MessageResponse::new("Password reset successful")))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Emails are compared case-insensitively.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

async fn find_user_by_email(state: &AppState, email: &str) -> AppResult<User> {
    let email = normalize_email(email);
    UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "User",
                key: email,
            })
        })
}

fn otp_matches(user: &User, submitted: &str) -> bool {
    otp::verify(
        submitted,
        user.otp_hash.as_deref(),
        user.otp_expires_at,
        Utc::now(),
    )
}

async fn send_otp(
    state: &AppState,
    email: &str,
    code: &str,
    purpose: OtpPurpose,
) -> AppResult<()> {
    state
        .otp_delivery
        .deliver(email, code, purpose)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to send OTP email: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emails_are_trimmed_and_lowercased() {
        assert_eq!(normalize_email("  Spike@Bebop.DEV "), "spike@bebop.dev");
    }

    #[test]
    fn padded_email_validates_once_normalized() {
        let input = SignupRequest {
            email: normalize_email("  Faye@Bebop.DEV "),
            username: "faye".into(),
            password: "correct-horse-battery".into(),
        };
        assert!(validate_input(&input).is_ok());
    }
}
