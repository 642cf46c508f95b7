//! Handlers for the caller's own account: profile, password and deletion.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use senpai_core::error::CoreError;
use senpai_core::types::DbId;
use senpai_core::validation::{require_non_blank, validate_input};
use senpai_db::models::favorite::FavoriteCounts;
use senpai_db::models::user::{UpdateProfile, User, UserResponse};
use senpai_db::repositories::{FavoriteRepo, UserRepo};

use crate::auth::password::{check_strength, hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// Request body for `PUT /profile/update`. Omitted fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    #[validate(length(max = 500, message = "bio must be at most 500 characters"))]
    pub bio: Option<String>,
    #[validate(email(message = "A valid email address is required"))]
    pub email: Option<String>,
}

/// Request body for `PUT /profile/change-password`.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Profile view: the account plus how many favorites it holds per category.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: UserResponse,
    pub favorites: FavoriteCounts,
}

/// GET /api/v1/profile
pub async fn get_profile(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let user = load_user(&state, auth.user_id).await?;
    let favorites = FavoriteRepo::count_by_category(&state.pool, user.id).await?;

    Ok(Json(DataResponse {
        data: ProfileResponse {
            user: UserResponse::from(&user),
            favorites,
        },
    }))
}

/// PUT /api/v1/profile/update
pub async fn update_profile(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfileRequest>,
) -> AppResult<impl IntoResponse> {
    let input = UpdateProfileRequest {
        username: input.username.map(|u| u.trim().to_string()),
        bio: input.bio.map(|b| b.trim().to_string()),
        email: input.email.map(|e| e.trim().to_lowercase()),
    };
    validate_input(&input)?;
    if let Some(username) = input.username.as_deref() {
        require_non_blank("username", username)?;
    }

    let patch = UpdateProfile {
        username: input.username,
        bio: input.bio,
        email: input.email,
    };

    // A taken email surfaces as a `uq_users_email` violation (409).
    let user = UserRepo::update_profile(&state.pool, auth.user_id, &patch)
        .await?
        .ok_or_else(|| user_not_found(auth.user_id))?;

    tracing::info!(user_id = user.id, "Profile updated");

    Ok(Json(DataResponse {
        data: UserResponse::from(&user),
    }))
}

/// PUT /api/v1/profile/change-password
pub async fn change_password(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    let user = load_user(&state, auth.user_id).await?;

    let current_valid = verify_password(&input.current_password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !current_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Current password is incorrect".into(),
        )));
    }

    check_strength(&input.new_password)?;

    let password_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    if !UserRepo::update_password(&state.pool, user.id, &password_hash).await? {
        return Err(user_not_found(user.id));
    }

    tracing::info!(user_id = user.id, "Password changed");

    Ok(Json(MessageResponse::new("Password changed successfully")))
}

/// DELETE /api/v1/profile/delete
///
/// Removes the account together with its favorites and recent items.
pub async fn delete_account(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<MessageResponse>> {
    if !UserRepo::delete(&state.pool, auth.user_id).await? {
        return Err(user_not_found(auth.user_id));
    }

    tracing::info!(user_id = auth.user_id, "Account deleted");

    Ok(Json(MessageResponse::new("Account deleted successfully")))
}

async fn load_user(state: &AppState, id: DbId) -> AppResult<User> {
    UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| user_not_found(id))
}

fn user_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "User",
        key: id.to_string(),
    })
}
