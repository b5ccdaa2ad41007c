//! Admin Dashboard
//!
//! Lists every transaction, optionally filtered by card. Unlike the customer
//! dashboard, a failed refresh empties the table rather than keeping stale
//! rows.

use cardbank_sdk::{CoreClient, SdkResult};
use cardbank_types::Transaction;
use std::future::Future;

use crate::input::InputField;

pub const MSG_LOAD_FAILED: &str = "Failed to load transactions";

#[derive(Debug)]
pub struct AdminDashboard {
    core: CoreClient,
    filter: InputField,
    transactions: Vec<Transaction>,
    loads_in_flight: usize,
    error: Option<String>,
}

impl AdminDashboard {
    pub fn new(core: CoreClient) -> Self {
        Self {
            core,
            filter: InputField::new(),
            transactions: Vec::new(),
            loads_in_flight: 0,
            error: None,
        }
    }

    pub fn filter(&self) -> &InputField {
        &self.filter
    }

    pub fn filter_mut(&mut self) -> &mut InputField {
        &mut self.filter
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn is_loading(&self) -> bool {
        self.loads_in_flight > 0
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether to render the explicit "No transactions" row
    pub fn shows_empty_row(&self) -> bool {
        !self.is_loading() && self.transactions.is_empty()
    }

    /// The card filter as sent: `None` when blank
    pub fn card_filter(&self) -> Option<&str> {
        Some(self.filter.value().trim()).filter(|f| !f.is_empty())
    }

    /// Mark a load in flight and return the request for the current
    /// filter. The previous error is cleared straight away.
    pub fn begin_load(&mut self) -> impl Future<Output = SdkResult<Vec<Transaction>>> + Send + 'static {
        self.loads_in_flight += 1;
        self.error = None;

        let core = self.core.clone();
        let filter = self.card_filter().map(str::to_string);
        async move { core.transactions(filter.as_deref()).await }
    }

    /// Apply a finished load
    pub fn finish_load(&mut self, result: SdkResult<Vec<Transaction>>) {
        self.loads_in_flight = self.loads_in_flight.saturating_sub(1);
        match result {
            Ok(transactions) => {
                tracing::debug!(count = transactions.len(), "Transactions loaded");
                self.transactions = transactions;
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to load transactions");
                self.error = Some(
                    err.server_message()
                        .unwrap_or(MSG_LOAD_FAILED)
                        .to_string(),
                );
                self.transactions.clear();
            }
        }
    }
}
