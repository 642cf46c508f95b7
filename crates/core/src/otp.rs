//! One-time password generation and verification.
//!
//! A user holds at most one OTP at a time. Only the SHA-256 digest of the code
//! is persisted together with its expiry; issuing a new code overwrites the
//! previous one, which invalidates it.

use chrono::Duration;
use rand::Rng;
use sha2::{Digest, Sha256};

use crate::types::Timestamp;

/// Number of decimal digits in a generated code.
pub const OTP_LENGTH: usize = 6;

/// Default lifetime of an issued code in minutes.
pub const DEFAULT_OTP_EXPIRY_MINS: i64 = 10;

/// A freshly generated code. `code` goes to the user, `hash` and
/// `expires_at` go to the database.
#[derive(Debug, Clone)]
pub struct IssuedOtp {
    pub code: String,
    pub hash: String,
    pub expires_at: Timestamp,
}

/// Generate a new zero-padded numeric code valid for `expiry_mins` from `now`.
pub fn issue(now: Timestamp, expiry_mins: i64) -> IssuedOtp {
    let code = generate_code();
    let hash = hash_otp(&code);
    IssuedOtp {
        code,
        hash,
        expires_at: now + Duration::minutes(expiry_mins),
    }
}

/// Generate a random code of [`OTP_LENGTH`] digits.
pub fn generate_code() -> String {
    let n: u32 = rand::rng().random_range(0..1_000_000);
    format!("{n:0width$}", width = OTP_LENGTH)
}

/// SHA-256 hex digest of a code.
pub fn hash_otp(code: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(code.trim().as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Check a submitted code against the stored slot.
///
/// Fails when no code is pending, when the code has expired, or when the
/// digests differ.
pub fn verify(
    submitted: &str,
    stored_hash: Option<&str>,
    expires_at: Option<Timestamp>,
    now: Timestamp,
) -> bool {
    let Some(stored_hash) = stored_hash else {
        return false;
    };
    if let Some(expires_at) = expires_at {
        if expires_at <= now {
            return false;
        }
    }
    hash_otp(submitted) == stored_hash
}
