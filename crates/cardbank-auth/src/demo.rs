//! Fixed allow-list authenticator
//!
//! Stand-in for a real authentication service: three demo cards with their
//! PINs and one admin account, compiled in.

use async_trait::async_trait;
use subtle::ConstantTimeEq;

use crate::error::{AuthError, AuthResult};
use crate::{Authenticator, Credentials, Grant};

/// One allow-listed card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoCard {
    pub card_number: String,
    pub pin: String,
}

impl DemoCard {
    pub fn new(card_number: impl Into<String>, pin: impl Into<String>) -> Self {
        Self {
            card_number: card_number.into(),
            pin: pin.into(),
        }
    }
}

/// Authenticator backed by a fixed allow-list
#[derive(Debug, Clone)]
pub struct DemoAuthenticator {
    cards: Vec<DemoCard>,
    admin_username: String,
    admin_password: String,
}

impl DemoAuthenticator {
    pub fn new(
        cards: Vec<DemoCard>,
        admin_username: impl Into<String>,
        admin_password: impl Into<String>,
    ) -> Self {
        Self {
            cards,
            admin_username: admin_username.into(),
            admin_password: admin_password.into(),
        }
    }

    /// Allow-listed cards, in display order
    pub fn cards(&self) -> &[DemoCard] {
        &self.cards
    }

    pub fn admin_username(&self) -> &str {
        &self.admin_username
    }

    pub fn admin_password(&self) -> &str {
        &self.admin_password
    }

    fn verify_card(&self, card_number: &str, pin: &str) -> AuthResult<Grant> {
        let card = self
            .cards
            .iter()
            .find(|card| card.card_number == card_number)
            .ok_or(AuthError::InvalidCardNumber)?;

        if !constant_time_compare(&card.pin, pin) {
            return Err(AuthError::InvalidPin);
        }

        Ok(Grant::customer(card.card_number.clone()))
    }

    fn verify_admin(&self, username: &str, password: &str) -> AuthResult<Grant> {
        let user_ok = constant_time_compare(&self.admin_username, username);
        let pass_ok = constant_time_compare(&self.admin_password, password);
        if user_ok && pass_ok {
            Ok(Grant::admin())
        } else {
            Err(AuthError::InvalidAdminCredentials)
        }
    }
}

impl Default for DemoAuthenticator {
    fn default() -> Self {
        Self::new(
            vec![
                DemoCard::new("4111111111111111", "1234"),
                DemoCard::new("4222222222222222", "5678"),
                DemoCard::new("4333333333333333", "9012"),
            ],
            "admin",
            "admin123",
        )
    }
}

#[async_trait]
impl Authenticator for DemoAuthenticator {
    async fn verify(&self, credentials: &Credentials) -> AuthResult<Grant> {
        let result = match credentials {
            Credentials::Card { card_number, pin } => self.verify_card(card_number, pin),
            Credentials::Admin { username, password } => self.verify_admin(username, password),
        };

        if let Err(err) = &result {
            tracing::info!(reason = err.reason(), "Demo login rejected");
        }
        result
    }
}

/// Constant-time string comparison
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.as_bytes().ct_eq(b.as_bytes()).into()
}
