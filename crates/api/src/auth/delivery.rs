//! Delivery of one-time passwords.
//!
//! Handlers only see the [`OtpDelivery`] trait. The server wires in
//! [`LogDelivery`], which writes the code to the log; a mail-backed
//! implementation can be swapped in through [`AppState`](crate::state::AppState)
//! without touching the handlers.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

/// Why an OTP could not be handed to the user.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("OTP delivery rejected: {0}")]
    Rejected(String),
}

/// Why a code is being sent. Used for message wording and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpPurpose {
    Signup,
    PasswordReset,
}

impl OtpPurpose {
    pub fn as_str(self) -> &'static str {
        match self {
            OtpPurpose::Signup => "signup",
            OtpPurpose::PasswordReset => "password_reset",
        }
    }
}

#[async_trait]
pub trait OtpDelivery: Send + Sync {
    /// Send `code` to `email`.
    async fn deliver(
        &self,
        email: &str,
        code: &str,
        purpose: OtpPurpose,
    ) -> Result<(), DeliveryError>;
}

/// Writes codes to the tracing log. Intended for local development.
#[derive(Debug, Default)]
pub struct LogDelivery;

#[async_trait]
impl OtpDelivery for LogDelivery {
    async fn deliver(
        &self,
        email: &str,
        code: &str,
        purpose: OtpPurpose,
    ) -> Result<(), DeliveryError> {
        tracing::info!(%email, purpose = purpose.as_str(), %code, "OTP issued");
        Ok(())
    }
}

/// Keeps the last code sent to each address in memory.
///
/// Used by integration tests to read the code a user would have received.
#[derive(Debug, Default)]
pub struct MemoryOutbox {
    sent: Mutex<HashMap<String, String>>,
}

impl MemoryOutbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent code delivered to `email`, if any.
    pub fn last_code(&self, email: &str) -> Option<String> {
        self.sent
            .lock()
            .ok()
            .and_then(|sent| sent.get(email).cloned())
    }
}

#[async_trait]
impl OtpDelivery for MemoryOutbox {
    async fn deliver(
        &self,
        email: &str,
        code: &str,
        _purpose: OtpPurpose,
    ) -> Result<(), DeliveryError> {
        let mut sent = self
            .sent
            .lock()
            .map_err(|_| DeliveryError::Rejected("outbox lock poisoned".into()))?;
        sent.insert(email.to_string(), code.to_string());
        Ok(())
    }
}
