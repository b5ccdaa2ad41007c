//! Authentication error types
//!
//! The display text of each variant is exactly what the login form shows.

use thiserror::Error;

/// Result type alias for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Card number is not known
    #[error("Invalid card number")]
    InvalidCardNumber,

    /// Card is known but the PIN does not match
    #[error("Invalid PIN")]
    InvalidPin,

    /// Username/password pair rejected
    #[error("Invalid admin credentials")]
    InvalidAdminCredentials,

    /// Verification could not be performed (backend-backed authenticators)
    #[error("Authentication unavailable: {0}")]
    Unavailable(String),
}

impl AuthError {
    /// Short machine-friendly reason for logs
    pub fn reason(&self) -> &'static str {
        match self {
            Self::InvalidCardNumber => "invalid_card",
            Self::InvalidPin => "invalid_pin",
            Self::InvalidAdminCredentials => "invalid_admin_credentials",
            Self::Unavailable(_) => "unavailable",
        }
    }
}
