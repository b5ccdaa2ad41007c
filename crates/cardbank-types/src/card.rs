//! Card account details as served by the core service

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::Transaction;

/// Read-only account view for one card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    #[serde(default)]
    pub id: Option<i64>,
    pub card_number: String,
    pub customer_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    #[serde(default)]
    pub pin_hash: Option<String>,
    /// Recent transactions embedded by some core versions
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl CardDetails {
    /// Card number reduced to its last four digits, e.g. `•••• 1111`
    pub fn masked_number(&self) -> String {
        mask_card(&self.card_number)
    }
}

/// Mask every digit but the last four
pub fn mask_card(card_number: &str) -> String {
    let chars: Vec<char> = card_number.chars().collect();
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("•••• {}", tail)
}
