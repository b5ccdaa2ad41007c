//! In-process stand-ins for the gateway and core services

#![allow(dead_code)]

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use cardbank_auth::DemoAuthenticator;
use cardbank_portal::PortalServices;
use cardbank_sdk::{CoreClient, EndpointConfig, GatewayClient};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

pub const ALICE: &str = "4111111111111111";
pub const BOB: &str = "4222222222222222";
pub const CAROL: &str = "4333333333333333";

/// Larger amounts are refused with a 400 before any card lookup
pub const SINGLE_LIMIT: f64 = 10_000.0;

pub struct Card {
    pub name: &'static str,
    pub pin: &'static str,
    pub balance: f64,
}

/// Backend state shared by both fake services
pub struct BankState {
    pub cards: HashMap<String, Card>,
    pub transactions: Vec<Value>,
    /// Every core endpoint answers with this status and optional message
    pub core_failure: Option<(StatusCode, Option<&'static str>)>,
    /// Only the history endpoint fails
    pub history_failure: bool,
    pub process_calls: usize,
    pub card_calls: usize,
    pub history_calls: usize,
    pub list_calls: usize,
    pub last_list_query: Option<HashMap<String, String>>,
}

impl BankState {
    fn new() -> Self {
        let mut cards = HashMap::new();
        cards.insert(ALICE.to_string(), Card { name: "Alice Demo", pin: "1234", balance: 100.0 });
        cards.insert(BOB.to_string(), Card { name: "Bob Demo", pin: "5678", balance: 250.0 });
        cards.insert(CAROL.to_string(), Card { name: "Carol Demo", pin: "9012", balance: 0.0 });
        Self {
            cards,
            transactions: Vec::new(),
            core_failure: None,
            history_failure: false,
            process_calls: 0,
            card_calls: 0,
            history_calls: 0,
            list_calls: 0,
            last_list_query: None,
        }
    }

    fn failure(&self) -> Option<Response> {
        self.core_failure.map(|(status, message)| match message {
            Some(message) => (status, Json(json!({ "message": message }))).into_response(),
            None => status.into_response(),
        })
    }

    fn record(&mut self, card: &str, kind: &str, amount: f64, status: &str, reason: &str) {
        let balance_after = self.cards.get(card).map(|c| c.balance);
        let id = self.transactions.len() as i64 + 1;
        self.transactions.push(json!({
            "id": id,
            "cardNumber": card,
            "type": kind,
            "amount": amount,
            "timestamp": "2024-05-01T10:00:00",
            "status": status,
            "balanceAfter": balance_after,
            "reason": reason
        }));
    }

    /// Seed one successful history row for `card`
    pub fn seed(&mut self, card: &str, amount: f64) {
        self.record(card, "topup", amount, "SUCCESS", "seed");
    }
}

pub type Shared = Arc<Mutex<BankState>>;

async fn card_details(State(bank): State<Shared>, Path(card): Path<String>) -> Response {
    let mut bank = bank.lock();
    bank.card_calls += 1;
    if let Some(resp) = bank.failure() {
        return resp;
    }
    match bank.cards.get(&card) {
        Some(c) => Json(json!({
            "cardNumber": card,
            "customerName": c.name,
            "balance": c.balance
        }))
        .into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({"message": "Card not found"}))).into_response(),
    }
}

async fn card_history(State(bank): State<Shared>, Path(card): Path<String>) -> Response {
    let mut bank = bank.lock();
    bank.history_calls += 1;
    if let Some(resp) = bank.failure() {
        return resp;
    }
    if bank.history_failure {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    let rows: Vec<Value> = bank
        .transactions
        .iter()
        .rev()
        .filter(|t| t["cardNumber"] == card.as_str())
        .cloned()
        .collect();
    Json(rows).into_response()
}

async fn list_transactions(
    State(bank): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let mut bank = bank.lock();
    bank.list_calls += 1;
    bank.last_list_query = Some(params.clone());
    if let Some(resp) = bank.failure() {
        return resp;
    }
    let rows: Vec<Value> = match params.get("cardNumber") {
        Some(card) => bank
            .transactions
            .iter()
            .filter(|t| t["cardNumber"] == card.as_str())
            .cloned()
            .collect(),
        None => bank.transactions.clone(),
    };
    Json(rows).into_response()
}

async fn process(State(bank): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut bank = bank.lock();
    bank.process_calls += 1;

    let card = body["cardNumber"].as_str().unwrap_or_default().to_string();
    let pin = body["pin"].as_str().unwrap_or_default();
    let kind = body["type"].as_str().unwrap_or_default().to_string();
    let amount = body["amount"].as_f64().unwrap_or(0.0);

    if amount <= 0.0 {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"success": false, "message": "Amount must be > 0"})),
        )
            .into_response();
    }
    if amount > SINGLE_LIMIT {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "Amount exceeds single transaction limit"})),
        )
            .into_response();
    }

    let Some(entry) = bank.cards.get_mut(&card) else {
        return Json(json!({"success": false, "message": "Card not found"})).into_response();
    };
    if entry.pin != pin {
        let balance = entry.balance;
        bank.record(&card, &kind, amount, "FAILED", "Invalid PIN");
        return Json(json!({"success": false, "message": "Invalid PIN", "balance": balance}))
            .into_response();
    }

    let message = match kind.as_str() {
        "withdraw" if entry.balance < amount => {
            let balance = entry.balance;
            bank.record(&card, &kind, amount, "FAILED", "Insufficient balance");
            return Json(json!({"success": false, "message": "Insufficient balance", "balance": balance}))
                .into_response();
        }
        "withdraw" => {
            entry.balance -= amount;
            "Withdrawal successful"
        }
        _ => {
            entry.balance += amount;
            "Top-up successful"
        }
    };
    let balance = entry.balance;
    bank.record(&card, &kind, amount, "SUCCESS", message);
    let id = bank.transactions.len();
    Json(json!({"success": true, "message": message, "balance": balance, "transactionId": id}))
        .into_response()
}

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// A base URL nothing is listening on
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// A base URL that accepts connections and never answers
pub async fn silent_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{}", addr)
}

pub struct MockBank {
    pub state: Shared,
    pub gateway_url: String,
    pub core_url: String,
}

impl MockBank {
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(BankState::new()));

        let gateway = Router::new()
            .route("/api/v1/transactions/process", post(process))
            .with_state(state.clone());
        let core = Router::new()
            .route("/api/v2/banking/card/:card", get(card_details))
            .route("/api/v2/banking/transactions/:card", get(card_history))
            .route("/api/v2/banking/transactions", get(list_transactions))
            .with_state(state.clone());

        let gateway_url = format!("{}/api/v1", serve(gateway).await);
        let core_url = format!("{}/api/v2/banking", serve(core).await);
        Self {
            state,
            gateway_url,
            core_url,
        }
    }

    pub fn services(&self) -> PortalServices {
        services_for(&self.gateway_url, &self.core_url)
    }

    pub fn process_calls(&self) -> usize {
        self.state.lock().process_calls
    }

    pub fn card_calls(&self) -> usize {
        self.state.lock().card_calls
    }

    pub fn balance(&self, card: &str) -> f64 {
        self.state.lock().cards[card].balance
    }
}

pub fn services_for(gateway_url: &str, core_url: &str) -> PortalServices {
    let core = CoreClient::new(EndpointConfig::new(core_url)).unwrap();
    let gateway = GatewayClient::new(EndpointConfig::new(gateway_url)).unwrap();
    PortalServices::new(core, gateway, Arc::new(DemoAuthenticator::default()))
        .with_refresh_delay(Duration::from_millis(10))
}
