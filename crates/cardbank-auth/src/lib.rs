//! CardBank Authentication Capability
//!
//! Login views never compare credentials themselves. They hand a
//! [`Credentials`] value to an [`Authenticator`] and get back either a
//! [`Grant`] (the role, plus the card for customers) or an [`AuthError`]
//! whose display text is the message shown to the user.
//!
//! ```text
//! LoginView ──Credentials──▶ Authenticator ──▶ Grant | AuthError
//!                                 │
//!                  ┌──────────────┴──────────────┐
//!                  ▼                             ▼
//!          DemoAuthenticator             (backend-backed impl)
//!          fixed allow-list
//! ```
//!
//! Swapping the allow-list for a real backend only means providing another
//! `Authenticator`; routing and views are untouched.

pub mod demo;
pub mod error;

pub use demo::{DemoAuthenticator, DemoCard};
pub use error::{AuthError, AuthResult};

use async_trait::async_trait;
use cardbank_types::Role;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Credentials entered in one of the two login forms
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Credentials {
    /// Card number + PIN
    Card { card_number: String, pin: String },
    /// Username + password
    Admin { username: String, password: String },
}

// Secrets never reach logs through Debug.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Card { card_number, .. } => f
                .debug_struct("Card")
                .field("card_number", card_number)
                .field("pin", &"***")
                .finish(),
            Self::Admin { username, .. } => f
                .debug_struct("Admin")
                .field("username", username)
                .field("password", &"***")
                .finish(),
        }
    }
}

/// Successful verification result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    pub role: Role,
    /// Present for customers, absent for admins
    pub card_number: Option<String>,
}

impl Grant {
    pub fn customer(card_number: impl Into<String>) -> Self {
        Self {
            role: Role::Customer,
            card_number: Some(card_number.into()),
        }
    }

    pub fn admin() -> Self {
        Self {
            role: Role::Admin,
            card_number: None,
        }
    }
}

/// Credential verification capability
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Verify credentials and return the role they grant
    async fn verify(&self, credentials: &Credentials) -> AuthResult<Grant>;
}
