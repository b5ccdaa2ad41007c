//! Session types
//!
//! A session is the authenticated actor class plus, for customers, the card
//! the portal is acting on.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Authenticated actor class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Customer,
    Admin,
}

impl Role {
    /// Persisted/wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "CUSTOMER",
            Self::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: {0:?}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CUSTOMER" => Ok(Self::Customer),
            "ADMIN" => Ok(Self::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Current session
///
/// `Session::default()` is the signed-out state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub role: Option<Role>,
    pub card_number: Option<String>,
}

impl Session {
    /// A customer session bound to `card_number`
    pub fn customer(card_number: impl Into<String>) -> Self {
        Self {
            role: Some(Role::Customer),
            card_number: Some(card_number.into()),
        }
    }

    /// An admin session (admins never carry a card)
    pub fn admin() -> Self {
        Self {
            role: Some(Role::Admin),
            card_number: None,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.role.is_some()
    }

    /// The active card identifier, if present and non-empty
    pub fn active_card(&self) -> Option<&str> {
        self.card_number.as_deref().filter(|card| !card.is_empty())
    }
}
