//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use senpai_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password and OTP hashes -- NEVER serialize this to API
/// responses directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub otp_hash: Option<String>,
    pub otp_expires_at: Option<Timestamp>,
    pub is_verified: bool,
    pub bio: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub email: String,
    pub username: String,
    pub bio: String,
    pub is_verified: bool,
    pub created_at: Timestamp,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            bio: user.bio.clone(),
            is_verified: user.is_verified,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new, unverified user with a pending OTP.
#[derive(Debug)]
pub struct CreateUser {
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub otp_hash: String,
    pub otp_expires_at: Timestamp,
}

/// DTO for a profile patch. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfile {
    pub username: Option<String>,
    pub bio: Option<String>,
    pub email: Option<String>,
}
