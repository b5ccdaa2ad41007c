//! Gateway authority client (transaction submission)

use cardbank_types::{TransactionRequest, TransactionResponse};
use reqwest::Method;

use crate::config::EndpointConfig;
use crate::error::SdkResult;
use crate::http::ApiClient;

/// Client for the service that mutates balances
#[derive(Debug, Clone)]
pub struct GatewayClient {
    api: ApiClient,
}

impl GatewayClient {
    pub fn new(config: EndpointConfig) -> SdkResult<Self> {
        Ok(Self {
            api: ApiClient::new(&config)?,
        })
    }

    pub fn base_url(&self) -> &str {
        self.api.base_url().as_str()
    }

    /// `POST /transactions/process`
    ///
    /// A `success: false` body is still `Ok`: the gateway answered, it just
    /// declined. Only non-success statuses and transport failures are errors.
    pub async fn process_transaction(
        &self,
        request: &TransactionRequest,
    ) -> SdkResult<TransactionResponse> {
        tracing::info!(
            card = %request.card_number,
            kind = %request.kind,
            amount = %request.amount,
            "Submitting transaction"
        );
        let builder = self
            .api
            .request(Method::POST, &["transactions", "process"])
            .json(request);
        self.api.send_json(builder).await
    }
}
