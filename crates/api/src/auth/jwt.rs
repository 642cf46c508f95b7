//! Bearer tokens for authenticated sessions.
//!
//! A token is an HS256 JWT over [`Claims`]. Sessions are not refreshable:
//! when `exp` passes the client logs in again.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use senpai_core::types::DbId;
use uuid::Uuid;

use crate::config::{env_or, require_env};

/// Session lifetime used when `JWT_EXPIRY_MINS` is unset.
pub const DEFAULT_EXPIRY_MINS: i64 = 120;

/// Payload of a session token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Id of the user the session belongs to.
    pub sub: DbId,
    /// Username when the session was opened.
    pub username: String,
    pub exp: i64,
    pub iat: i64,
    /// Random per-token id, so two logins in the same second differ.
    pub jti: String,
}

impl Claims {
    fn new(user_id: DbId, username: &str, issued_at: i64, ttl_secs: i64) -> Self {
        Self {
            sub: user_id,
            username: username.to_string(),
            exp: issued_at + ttl_secs,
            iat: issued_at,
            jti: Uuid::new_v4().to_string(),
        }
    }
}

/// Signing secret and session lifetime.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry_mins: i64,
}

impl JwtConfig {
    /// Read `JWT_SECRET` (required, non-empty) and `JWT_EXPIRY_MINS`.
    ///
    /// # Panics
    ///
    /// Panics when the secret is missing or the expiry is not an integer.
    pub fn from_env() -> Self {
        Self {
            secret: require_env("JWT_SECRET"),
            expiry_mins: env_or("JWT_EXPIRY_MINS", DEFAULT_EXPIRY_MINS),
        }
    }

    /// Seconds a freshly issued token stays valid.
    pub fn expires_in_secs(&self) -> i64 {
        self.expiry_mins * 60
    }

    /// Sign a session token for `user_id`.
    pub fn issue(
        &self,
        user_id: DbId,
        username: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims::new(
            user_id,
            username,
            Utc::now().timestamp(),
            self.expires_in_secs(),
        );
        self.sign(&claims)
    }

    /// Check signature and expiry, returning the claims on success.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
    }

    fn sign(&self, claims: &Claims) -> Result<String, jsonwebtoken::errors::Error> {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> JwtConfig {
        JwtConfig {
            secret: secret.to_string(),
            expiry_mins: DEFAULT_EXPIRY_MINS,
        }
    }

    #[test]
    fn issued_token_round_trips_claims() {
        let jwt = config("bebop-signing-secret");
        let token = jwt.issue(42, "spike").unwrap();

        let claims = jwt.verify(&token).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.username, "spike");
        assert_eq!(claims.exp - claims.iat, jwt.expires_in_secs());
    }

    #[test]
    fn two_tokens_for_same_user_differ() {
        let jwt = config("bebop-signing-secret");
        assert_ne!(jwt.issue(1, "jet").unwrap(), jwt.issue(1, "jet").unwrap());
    }

    #[test]
    fn expired_token_is_rejected() {
        let jwt = config("bebop-signing-secret");
        // Past the library's default 60s leeway.
        let stale = Claims::new(1, "faye", Utc::now().timestamp() - 7200, 300);
        let token = jwt.sign(&stale).unwrap();

        assert!(jwt.verify(&token).is_err());
    }

    #[test]
    fn token_from_another_secret_is_rejected() {
        let token = config("secret-alpha").issue(1, "ed").unwrap();
        assert!(config("secret-bravo").verify(&token).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(config("s").verify("not.a.jwt").is_err());
        assert!(config("s").verify("").is_err());
    }
}
