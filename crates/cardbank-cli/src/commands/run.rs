//! Run command - start the terminal portal

use anyhow::Context;
use cardbank_auth::DemoAuthenticator;
use cardbank_portal::{FileStorage, Portal, PortalServices, SessionStore};
use cardbank_sdk::{CoreClient, GatewayClient};
use cardbank_tui::{run_portal_tui, App};
use std::sync::Arc;

use crate::config::AppConfig;

pub async fn run(config: &AppConfig, path: Option<&str>) -> anyhow::Result<()> {
    let core = CoreClient::new(config.core.endpoint()).context("invalid core service URL")?;
    let gateway =
        GatewayClient::new(config.gateway.endpoint()).context("invalid gateway service URL")?;

    let authenticator = DemoAuthenticator::default();
    let hints = demo_hints(&authenticator);

    let services = PortalServices::new(core, gateway, Arc::new(authenticator))
        .with_refresh_delay(config.dashboard.refresh_delay());
    let storage = FileStorage::new(config.session.storage_path());
    tracing::info!(
        gateway = %config.gateway.base_url,
        core = %config.core.base_url,
        session = %storage.path().display(),
        "Starting portal"
    );

    // returns at once; the first screen loads while the UI is already drawing
    let portal = Portal::start(SessionStore::new(Arc::new(storage)), services, path);
    let mut app = App::new(portal).with_demo_hints(hints);
    run_portal_tui(&mut app).await.context("terminal UI failed")?;
    Ok(())
}

fn demo_hints(authenticator: &DemoAuthenticator) -> Vec<String> {
    let mut hints: Vec<String> = authenticator
        .cards()
        .iter()
        .map(|card| format!("Card {}  PIN {}", card.card_number, card.pin))
        .collect();
    hints.push(format!(
        "Admin {} / {}",
        authenticator.admin_username(),
        authenticator.admin_password()
    ));
    hints
}
