//! Customer Dashboard
//!
//! Balance, a top-up/withdraw form and the card's history. All numbers come
//! from the core service; after a successful submission the dashboard waits
//! a short, fixed delay and reads them again, because the write path (gateway)
//! and read path (core) are not immediately consistent.

use cardbank_sdk::{CoreClient, GatewayClient, SdkResult};
use cardbank_types::{
    CardDetails, Transaction, TransactionKind, TransactionRequest, TransactionResponse,
};
use rust_decimal::Decimal;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

use crate::input::InputField;

/// Delay between a successful submission and the follow-up re-fetch
pub const DEFAULT_REFRESH_DELAY: Duration = Duration::from_millis(500);

pub const MSG_LOAD_FAILED: &str = "Failed to load account data";
pub const MSG_PIN_REQUIRED: &str = "PIN is required";
pub const MSG_INVALID_AMOUNT: &str = "Please enter a valid amount greater than 0";
pub const MSG_TRANSACTION_FAILED: &str = "Transaction failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

/// Message shown above the submit button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub text: String,
}

impl Banner {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Error,
            text: text.into(),
        }
    }
}

/// What happened to a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A load or an earlier submission is in flight; the control is disabled
    Blocked,
    /// Failed local validation, no request was sent
    Rejected,
    /// The gateway answered `success: false`
    Declined,
    /// Error response or no response
    Failed,
    /// Accepted; a re-fetch is scheduled for `refresh_at`
    Accepted { refresh_at: Instant },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerField {
    Amount,
    Pin,
}

impl CustomerField {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Amount => "Amount",
            Self::Pin => "PIN",
        }
    }
}

/// Result of the two concurrent reads
pub type AccountData = (CardDetails, Vec<Transaction>);

/// Customer dashboard state for one card
#[derive(Debug)]
pub struct CustomerDashboard {
    core: CoreClient,
    gateway: GatewayClient,
    card_number: String,
    details: Option<CardDetails>,
    transactions: Vec<Transaction>,
    loads_in_flight: usize,
    submitting: bool,
    amount: InputField,
    pin: InputField,
    kind: TransactionKind,
    focus: CustomerField,
    message: Option<Banner>,
    refresh_delay: Duration,
    pending_refresh: Option<Instant>,
}

impl CustomerDashboard {
    pub fn new(
        core: CoreClient,
        gateway: GatewayClient,
        card_number: impl Into<String>,
        refresh_delay: Duration,
    ) -> Self {
        Self {
            core,
            gateway,
            card_number: card_number.into(),
            details: None,
            transactions: Vec::new(),
            loads_in_flight: 0,
            submitting: false,
            amount: InputField::new(),
            pin: InputField::new().with_max_len(4).secret(),
            kind: TransactionKind::TopUp,
            focus: CustomerField::Amount,
            message: None,
            refresh_delay,
            pending_refresh: None,
        }
    }

    pub fn card_number(&self) -> &str {
        &self.card_number
    }

    pub fn details(&self) -> Option<&CardDetails> {
        self.details.as_ref()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn is_loading(&self) -> bool {
        self.loads_in_flight > 0
    }

    /// The history table shows a placeholder row when settled and empty
    pub fn shows_empty_row(&self) -> bool {
        !self.is_loading() && self.transactions.is_empty()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Whether the submit control is enabled
    pub fn can_submit(&self) -> bool {
        !self.is_loading() && !self.submitting
    }

    pub fn message(&self) -> Option<&Banner> {
        self.message.as_ref()
    }

    pub fn kind(&self) -> &TransactionKind {
        &self.kind
    }

    pub fn toggle_kind(&mut self) {
        self.kind = self.kind.toggled();
    }

    pub fn amount(&self) -> &InputField {
        &self.amount
    }

    pub fn amount_mut(&mut self) -> &mut InputField {
        &mut self.amount
    }

    pub fn pin(&self) -> &InputField {
        &self.pin
    }

    pub fn pin_mut(&mut self) -> &mut InputField {
        &mut self.pin
    }

    pub fn focused_field(&self) -> CustomerField {
        self.focus
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            CustomerField::Amount => CustomerField::Pin,
            CustomerField::Pin => CustomerField::Amount,
        };
    }

    /// Type into the focused field
    pub fn input(&mut self, c: char) {
        match self.focus {
            CustomerField::Amount => self.amount.push(c),
            CustomerField::Pin => self.pin.push(c),
        };
    }

    pub fn backspace(&mut self) {
        match self.focus {
            CustomerField::Amount => self.amount.pop(),
            CustomerField::Pin => self.pin.pop(),
        };
    }

    /// Deadline of the scheduled re-fetch, if any
    pub fn pending_refresh(&self) -> Option<Instant> {
        self.pending_refresh
    }

    /// Clear the scheduled re-fetch if its deadline has passed.
    /// Returns whether a load is due.
    pub fn take_due_refresh(&mut self, now: Instant) -> bool {
        match self.pending_refresh {
            Some(deadline) if now >= deadline => {
                self.pending_refresh = None;
                true
            }
            _ => false,
        }
    }

    /// Mark a load in flight and return the request for it.
    ///
    /// Details and history are fetched together; both must succeed for
    /// either to be shown.
    pub fn begin_load(&mut self) -> impl Future<Output = SdkResult<AccountData>> + Send + 'static {
        self.loads_in_flight += 1;
        let core = self.core.clone();
        let card_number = self.card_number.clone();
        async move {
            tokio::try_join!(
                core.card_details(&card_number),
                core.card_transactions(&card_number),
            )
        }
    }

    /// Apply a finished load. On failure the previous data stays on screen.
    pub fn finish_load(&mut self, result: SdkResult<AccountData>) {
        self.loads_in_flight = self.loads_in_flight.saturating_sub(1);
        match result {
            Ok((details, transactions)) => {
                tracing::debug!(
                    card = %self.card_number,
                    transactions = transactions.len(),
                    "Account data loaded"
                );
                self.details = Some(details);
                self.transactions = transactions;
            }
            Err(err) => {
                tracing::warn!(card = %self.card_number, error = %err, "Failed to load account data");
                self.message = Some(Banner::error(MSG_LOAD_FAILED));
            }
        }
    }

    /// Validate the form and build the gateway call.
    ///
    /// `Err` carries the outcome when nothing is sent: the control is
    /// disabled ([`SubmitOutcome::Blocked`]) or validation failed
    /// ([`SubmitOutcome::Rejected`]).
    pub fn begin_submit(
        &mut self,
    ) -> Result<impl Future<Output = SdkResult<TransactionResponse>> + Send + 'static, SubmitOutcome>
    {
        if !self.can_submit() {
            return Err(SubmitOutcome::Blocked);
        }
        self.message = None;

        if self.pin.is_empty() {
            self.message = Some(Banner::error(MSG_PIN_REQUIRED));
            return Err(SubmitOutcome::Rejected);
        }
        let Some(amount) = parse_amount(self.amount.value()) else {
            self.message = Some(Banner::error(MSG_INVALID_AMOUNT));
            return Err(SubmitOutcome::Rejected);
        };

        let request = TransactionRequest {
            card_number: self.card_number.clone(),
            pin: self.pin.value().to_string(),
            amount,
            kind: self.kind.clone(),
        };
        self.submitting = true;
        let gateway = self.gateway.clone();
        Ok(async move { gateway.process_transaction(&request).await })
    }

    /// Apply the gateway's answer
    pub fn finish_submit(&mut self, result: SdkResult<TransactionResponse>) -> SubmitOutcome {
        self.submitting = false;
        match result {
            Ok(response) if response.success => {
                self.message = Some(Banner::success(response.message));
                self.pin.clear();
                self.amount.clear();
                let refresh_at = Instant::now() + self.refresh_delay;
                self.pending_refresh = Some(refresh_at);
                SubmitOutcome::Accepted { refresh_at }
            }
            Ok(response) => {
                self.message = Some(Banner::error(response.message));
                SubmitOutcome::Declined
            }
            Err(err) => {
                tracing::warn!(card = %self.card_number, error = %err, "Transaction submission failed");
                let text = err.server_message().unwrap_or(MSG_TRANSACTION_FAILED);
                self.message = Some(Banner::error(text));
                SubmitOutcome::Failed
            }
        }
    }
}

/// A decimal amount strictly greater than zero
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    raw.trim()
        .parse::<Decimal>()
        .ok()
        .filter(|amount| *amount > Decimal::ZERO)
}
