//! Domain types and pure rules for the SenpaiStats backend.
//!
//! Nothing in this crate touches the database or the network. The
//! repository and HTTP layers both build on it.

pub mod category;
pub mod error;
pub mod favorites;
pub mod otp;
pub mod recent;
pub mod types;
pub mod validation;
