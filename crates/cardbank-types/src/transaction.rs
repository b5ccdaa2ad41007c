//! Transaction types
//!
//! Transactions are created exclusively by the core service in response to a
//! gateway submission. The portal only ever reads them.

use chrono::{DateTime, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status string the core service uses for completed transactions
pub const STATUS_SUCCESS: &str = "SUCCESS";

/// Direction of a balance change
///
/// The core service stores whatever type string it was given, so anything
/// other than `topup`/`withdraw` is kept verbatim instead of failing the
/// whole listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionKind {
    #[default]
    TopUp,
    Withdraw,
    Other(String),
}

impl TransactionKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::TopUp => "topup",
            Self::Withdraw => "withdraw",
            Self::Other(raw) => raw,
        }
    }

    /// Human label used by buttons and toggles
    pub fn label(&self) -> &str {
        match self {
            Self::TopUp => "Top Up",
            Self::Withdraw => "Withdraw",
            Self::Other(raw) => raw,
        }
    }

    /// The other of the two submittable kinds
    pub fn toggled(&self) -> Self {
        match self {
            Self::TopUp => Self::Withdraw,
            _ => Self::TopUp,
        }
    }
}

impl From<String> for TransactionKind {
    fn from(raw: String) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "topup" => Self::TopUp,
            "withdraw" => Self::Withdraw,
            _ => Self::Other(raw),
        }
    }
}

impl From<TransactionKind> for String {
    fn from(kind: TransactionKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of transaction history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub card_number: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub timestamp: String,
    pub status: String,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub balance_after: Option<Decimal>,
    /// Failure reason or success note recorded by the core service
    #[serde(default)]
    pub reason: Option<String>,
}

impl Transaction {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    /// Parse the timestamp, accepting RFC 3339 or a zone-less local time
    pub fn parsed_timestamp(&self) -> Option<NaiveDateTime> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .map(|dt| dt.naive_local())
            .or_else(|_| NaiveDateTime::parse_from_str(&self.timestamp, "%Y-%m-%dT%H:%M:%S%.f"))
            .ok()
    }

    /// Timestamp as `YYYY-MM-DD HH:MM:SS`, or the raw string if unparseable
    pub fn display_timestamp(&self) -> String {
        self.parsed_timestamp()
            .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| self.timestamp.clone())
    }
}

/// Gateway submission body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub card_number: String,
    pub pin: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

/// Gateway submission outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub balance: Option<Decimal>,
    #[serde(default)]
    pub transaction_id: Option<i64>,
}
