//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- JWT access-token generation and validation.
//! - [`delivery`] -- Delivery of one-time passwords to users.

pub mod delivery;
pub mod jwt;
pub mod password;
