//! Process configuration read from the environment (and `.env` via dotenvy).

use std::fmt::Display;
use std::str::FromStr;

use senpai_core::otp::DEFAULT_OTP_EXPIRY_MINS;

use crate::auth::jwt::JwtConfig;

/// Server settings. Everything except `JWT_SECRET` has a local-dev default.
///
/// | Env var                | Default                 |
/// |------------------------|-------------------------|
/// | `HOST`                 | `0.0.0.0`               |
/// | `PORT`                 | `5000`                  |
/// | `CORS_ORIGINS`         | `http://localhost:3000` |
/// | `REQUEST_TIMEOUT_SECS` | `30`                    |
/// | `OTP_EXPIRY_MINS`      | `10`                    |
/// | `JWT_SECRET`           | required                |
/// | `JWT_EXPIRY_MINS`      | `120`                   |
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Comma-separated in `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    /// Lifetime of signup and password-reset codes.
    pub otp_expiry_mins: i64,
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// # Panics
    ///
    /// Panics on unparsable values or a missing `JWT_SECRET`, so a
    /// misconfigured server never starts.
    pub fn from_env() -> Self {
        Self {
            host: env_or("HOST", "0.0.0.0".to_string()),
            port: env_or("PORT", 5000),
            cors_origins: parse_origins(&env_or(
                "CORS_ORIGINS",
                "http://localhost:3000".to_string(),
            )),
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30),
            otp_expiry_mins: env_or("OTP_EXPIRY_MINS", DEFAULT_OTP_EXPIRY_MINS),
            jwt: JwtConfig::from_env(),
        }
    }
}

/// Read and parse `key`, falling back to `default` when it is unset.
pub(crate) fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} has an invalid value '{raw}': {e}")),
        Err(_) => default,
    }
}

/// Read a variable that has no sensible default.
pub(crate) fn require_env(key: &str) -> String {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => panic!("{key} must be set in the environment"),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
