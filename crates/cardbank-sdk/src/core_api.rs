//! Core authority client (read-only account and transaction queries)

use cardbank_types::{CardDetails, Transaction};
use reqwest::Method;

use crate::config::EndpointConfig;
use crate::error::SdkResult;
use crate::http::ApiClient;

/// Client for the read-only banking service
#[derive(Debug, Clone)]
pub struct CoreClient {
    api: ApiClient,
}

impl CoreClient {
    pub fn new(config: EndpointConfig) -> SdkResult<Self> {
        Ok(Self {
            api: ApiClient::new(&config)?,
        })
    }

    pub fn base_url(&self) -> &str {
        self.api.base_url().as_str()
    }

    /// `GET /card/{cardNumber}`
    pub async fn card_details(&self, card_number: &str) -> SdkResult<CardDetails> {
        let builder = self.api.request(Method::GET, &["card", card_number]);
        self.api.send_json(builder).await
    }

    /// `GET /transactions/{cardNumber}`: one customer's history
    pub async fn card_transactions(&self, card_number: &str) -> SdkResult<Vec<Transaction>> {
        let builder = self.api.request(Method::GET, &["transactions", card_number]);
        self.api.send_json(builder).await
    }

    /// `GET /transactions[?cardNumber=..]`: all transactions, optionally
    /// scoped to one card. `None` omits the parameter entirely.
    pub async fn transactions(&self, card_filter: Option<&str>) -> SdkResult<Vec<Transaction>> {
        let mut builder = self.api.request(Method::GET, &["transactions"]);
        if let Some(card_number) = card_filter {
            builder = builder.query(&[("cardNumber", card_number)]);
        }
        self.api.send_json(builder).await
    }
}
