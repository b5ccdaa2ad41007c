//! CardBank Types - Canonical data model for the CardBank portal
//!
//! This crate contains the wire and session types shared by every other
//! cardbank crate. It has zero dependencies on other cardbank crates.
//!
//! - [`Role`] and [`Session`]: who is signed in, and with which card
//! - [`CardDetails`]: read-only account view returned by the core service
//! - [`Transaction`], [`TransactionRequest`], [`TransactionResponse`]:
//!   the transaction history and the gateway submission contract
//!
//! None of these types carry behaviour that computes money. Balances and
//! outcomes are always whatever the external services last returned.

pub mod card;
pub mod session;
pub mod transaction;

pub use card::*;
pub use session::*;
pub use transaction::*;

use rust_decimal::Decimal;

/// Format a monetary value for display, always with two decimals.
pub fn format_money(value: Decimal) -> String {
    format!("${:.2}", value.round_dp(2))
}
