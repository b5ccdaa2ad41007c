//! End-to-end portal behaviour against in-process fake services

mod common;

use axum::http::StatusCode;
use cardbank_portal::{
    AdminDashboard, BannerKind, CustomerDashboard, LoginField, LoginMode, MemoryStorage, Portal,
    Route, Screen, SessionStore, CARD_KEY, ROLE_KEY,
};
use cardbank_types::{Role, Session, TransactionKind};
use common::{dead_url, services_for, silent_url, MockBank, ALICE, BOB, CAROL};
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::time::Duration;

async fn start_portal(bank: &MockBank, storage: &Arc<MemoryStorage>) -> Portal {
    let store = SessionStore::new(storage.clone());
    let mut portal = Portal::start(store, bank.services(), None);
    portal.settle().await;
    portal
}

async fn login_customer(portal: &mut Portal, card: &str, pin: &str) -> bool {
    let Screen::Login(view) = portal.screen_mut() else {
        panic!("expected login screen");
    };
    view.set_mode(LoginMode::Customer);
    view.field_mut(LoginField::CardNumber).set(card);
    view.field_mut(LoginField::Pin).set(pin);
    assert!(portal.submit_login());
    portal.settle().await;
    portal.session().current().is_signed_in()
}

async fn login_admin(portal: &mut Portal, username: &str, password: &str) -> bool {
    let Screen::Login(view) = portal.screen_mut() else {
        panic!("expected login screen");
    };
    view.set_mode(LoginMode::Admin);
    view.field_mut(LoginField::Username).set(username);
    view.field_mut(LoginField::Password).set(password);
    assert!(portal.submit_login());
    portal.settle().await;
    portal.session().current().is_signed_in()
}

fn login_error(portal: &Portal) -> Option<String> {
    match portal.screen() {
        Screen::Login(view) => view.error().map(str::to_string),
        _ => None,
    }
}

fn customer(portal: &mut Portal) -> &mut CustomerDashboard {
    match portal.screen_mut() {
        Screen::Customer(dashboard) => dashboard,
        other => panic!("expected customer dashboard, got {:?}", other),
    }
}

fn admin(portal: &mut Portal) -> &mut AdminDashboard {
    match portal.screen_mut() {
        Screen::Admin(dashboard) => dashboard,
        other => panic!("expected admin dashboard, got {:?}", other),
    }
}

/// Fill the transaction form, submit it and wait for the answer
async fn transact(portal: &mut Portal, amount: &str, pin: &str) {
    let dashboard = customer(portal);
    dashboard.amount_mut().set(amount);
    dashboard.pin_mut().set(pin);
    assert!(portal.submit_transaction());
    portal.settle().await;
}

async fn run_due_refresh(portal: &mut Portal) {
    let due = portal.next_refresh().expect("a scheduled refresh");
    tokio::time::sleep_until(due).await;
    assert!(portal.tick());
    portal.settle().await;
}

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn test_every_demo_card_lands_on_customer_view() {
    let bank = MockBank::start().await;
    for (card, pin) in [(ALICE, "1234"), (BOB, "5678"), (CAROL, "9012")] {
        let storage = Arc::new(MemoryStorage::new());
        let mut portal = start_portal(&bank, &storage).await;
        assert_eq!(portal.route(), Route::Login);

        assert!(login_customer(&mut portal, card, pin).await);
        assert_eq!(portal.route(), Route::Customer);
        assert_eq!(portal.session().current(), Session::customer(card));
        assert_eq!(storage.entries().get(CARD_KEY).map(String::as_str), Some(card));

        let dashboard = customer(&mut portal);
        assert_eq!(dashboard.card_number(), card);
        // mounted dashboards load straight away
        assert_eq!(dashboard.details().unwrap().card_number, card);
        assert!(!portal.is_busy());
    }
}

#[tokio::test]
async fn test_unknown_card_establishes_no_session() {
    let bank = MockBank::start().await;
    let storage = Arc::new(MemoryStorage::new());
    let mut portal = start_portal(&bank, &storage).await;

    assert!(!login_customer(&mut portal, "4999999999999999", "1234").await);
    assert_eq!(portal.route(), Route::Login);
    assert_eq!(login_error(&portal).as_deref(), Some("Invalid card number"));
    assert_eq!(portal.session().current(), Session::default());
    assert!(storage.entries().is_empty());
}

#[tokio::test]
async fn test_wrong_pin_message_differs_from_card_message() {
    let bank = MockBank::start().await;
    let storage = Arc::new(MemoryStorage::new());
    let mut portal = start_portal(&bank, &storage).await;

    assert!(!login_customer(&mut portal, ALICE, "5678").await);
    assert_eq!(login_error(&portal).as_deref(), Some("Invalid PIN"));
    assert!(!portal.session().current().is_signed_in());
}

#[tokio::test]
async fn test_admin_login() {
    let bank = MockBank::start().await;
    let storage = Arc::new(MemoryStorage::new());
    let mut portal = start_portal(&bank, &storage).await;

    assert!(!login_admin(&mut portal, "admin", "wrong").await);
    assert_eq!(login_error(&portal).as_deref(), Some("Invalid admin credentials"));
    assert!(!login_admin(&mut portal, "root", "admin123").await);
    assert_eq!(login_error(&portal).as_deref(), Some("Invalid admin credentials"));

    assert!(login_admin(&mut portal, "admin", "admin123").await);
    assert_eq!(portal.route(), Route::Admin);
    assert_eq!(portal.session().current(), Session::admin());
    assert_eq!(storage.entries().get(ROLE_KEY).map(String::as_str), Some("ADMIN"));
    assert!(matches!(portal.screen(), Screen::Admin(_)));
}

// =============================================================================
// Restore & routing
// =============================================================================

#[tokio::test]
async fn test_restored_customer_skips_login() {
    let bank = MockBank::start().await;
    let storage = Arc::new(MemoryStorage::with_entries([(ROLE_KEY, "CUSTOMER"), (CARD_KEY, BOB)]));
    let mut portal = start_portal(&bank, &storage).await;

    assert_eq!(portal.route(), Route::Customer);
    let dashboard = customer(&mut portal);
    assert_eq!(dashboard.card_number(), BOB);
    assert_eq!(dashboard.details().unwrap().customer_name, "Bob Demo");
}

#[tokio::test]
async fn test_restored_customer_without_card_redirects_to_login() {
    let bank = MockBank::start().await;
    let storage = Arc::new(MemoryStorage::with_entries([(ROLE_KEY, "CUSTOMER")]));
    let portal = start_portal(&bank, &storage).await;

    assert_eq!(portal.route(), Route::Login);
    assert_eq!(portal.session().current().role, Some(Role::Customer));
    assert_eq!(bank.card_calls(), 0);
}

#[tokio::test]
async fn test_deep_links_go_through_guards() {
    let bank = MockBank::start().await;
    let storage = Arc::new(MemoryStorage::with_entries([(ROLE_KEY, "ADMIN")]));

    let store = SessionStore::new(storage.clone());
    let mut portal = Portal::start(store, bank.services(), Some("/customer"));
    assert_eq!(portal.route(), Route::Login);

    portal.navigate("/admin");
    assert_eq!(portal.route(), Route::Admin);

    portal.navigate("/nowhere");
    assert_eq!(portal.route(), Route::Login);

    // the admin load issued on the way is dropped with its screen
    portal.settle().await;
    assert!(matches!(portal.screen(), Screen::Login(_)));
}

// =============================================================================
// Responsiveness
// =============================================================================

#[tokio::test]
async fn test_start_returns_while_core_is_silent() {
    let bank = MockBank::start().await;
    let storage = Arc::new(MemoryStorage::with_entries([(ROLE_KEY, "CUSTOMER"), (CARD_KEY, ALICE)]));
    let services = services_for(&bank.gateway_url, &silent_url().await);

    let mut portal = tokio::time::timeout(Duration::from_secs(1), async {
        Portal::start(SessionStore::new(storage.clone()), services, None)
    })
    .await
    .expect("start must not wait for the first load");

    assert_eq!(portal.route(), Route::Customer);
    assert!(portal.is_busy());
    assert!(!portal.tick());

    // the form stays editable, only submit is disabled
    let dashboard = customer(&mut portal);
    assert!(dashboard.is_loading());
    assert!(!dashboard.can_submit());
    dashboard.input('5');
    assert_eq!(dashboard.amount().value(), "5");
    dashboard.pin_mut().set("1234");
    assert!(!portal.submit_transaction());
    assert_eq!(bank.process_calls(), 0);

    // signing out does not wait for the load either
    portal.logout();
    assert_eq!(portal.route(), Route::Login);
    assert!(!portal.session().current().is_signed_in());
}

// =============================================================================
// Customer dashboard
// =============================================================================

#[tokio::test]
async fn test_invalid_amounts_never_reach_gateway() {
    let bank = MockBank::start().await;
    let storage = Arc::new(MemoryStorage::with_entries([(ROLE_KEY, "CUSTOMER"), (CARD_KEY, ALICE)]));
    let mut portal = start_portal(&bank, &storage).await;

    customer(&mut portal).pin_mut().set("1234");
    for amount in ["0", "abc", "", "-3", "0.00"] {
        customer(&mut portal).amount_mut().set(amount);
        assert!(!portal.submit_transaction());
        let banner = customer(&mut portal).message().unwrap();
        assert_eq!(banner.kind, BannerKind::Error);
        assert_eq!(banner.text, "Please enter a valid amount greater than 0");
    }

    let dashboard = customer(&mut portal);
    dashboard.pin_mut().clear();
    dashboard.amount_mut().set("10");
    assert!(!portal.submit_transaction());
    assert_eq!(customer(&mut portal).message().unwrap().text, "PIN is required");

    assert_eq!(bank.process_calls(), 0);
}

#[tokio::test]
async fn test_successful_top_up_clears_form_and_refetches() {
    let bank = MockBank::start().await;
    let storage = Arc::new(MemoryStorage::with_entries([(ROLE_KEY, "CUSTOMER"), (CARD_KEY, ALICE)]));
    let mut portal = start_portal(&bank, &storage).await;
    let loads_after_mount = bank.card_calls();

    {
        let dashboard = customer(&mut portal);
        assert_eq!(dashboard.details().unwrap().balance, dec!(100));
        assert!(dashboard.transactions().is_empty());
    }

    transact(&mut portal, "50.25", "1234").await;
    {
        let dashboard = customer(&mut portal);
        let banner = dashboard.message().unwrap();
        assert_eq!(banner.kind, BannerKind::Success);
        assert_eq!(banner.text, "Top-up successful");
        assert!(dashboard.amount().is_empty());
        assert!(dashboard.pin().is_empty());
        // stale until the scheduled re-fetch runs
        assert_eq!(dashboard.details().unwrap().balance, dec!(100));
    }
    assert!(portal.next_refresh().is_some());

    run_due_refresh(&mut portal).await;
    assert!(portal.next_refresh().is_none());

    let dashboard = customer(&mut portal);
    assert_eq!(dashboard.details().unwrap().balance, dec!(150.25));
    assert_eq!(dashboard.transactions().len(), 1);
    assert_eq!(dashboard.transactions()[0].kind, TransactionKind::TopUp);

    assert_eq!(bank.card_calls(), loads_after_mount + 1);
    assert_eq!(bank.balance(ALICE), 150.25);
}

#[tokio::test]
async fn test_scheduled_refresh_fires_once_from_tick() {
    let bank = MockBank::start().await;
    let storage = Arc::new(MemoryStorage::with_entries([(ROLE_KEY, "CUSTOMER"), (CARD_KEY, BOB)]));
    let mut portal = start_portal(&bank, &storage).await;
    let loads_after_mount = bank.card_calls();

    customer(&mut portal).toggle_kind();
    assert_eq!(customer(&mut portal).kind(), &TransactionKind::Withdraw);
    transact(&mut portal, "50", "5678").await;

    assert!(!portal.tick());
    run_due_refresh(&mut portal).await;
    assert!(!portal.tick());
    assert_eq!(bank.card_calls(), loads_after_mount + 1);
    assert_eq!(customer(&mut portal).details().unwrap().balance, dec!(200));
}

#[tokio::test]
async fn test_declined_submission_keeps_fields() {
    let bank = MockBank::start().await;
    let storage = Arc::new(MemoryStorage::with_entries([(ROLE_KEY, "CUSTOMER"), (CARD_KEY, CAROL)]));
    let mut portal = start_portal(&bank, &storage).await;

    customer(&mut portal).toggle_kind();
    transact(&mut portal, "10", "9012").await;

    let dashboard = customer(&mut portal);
    let banner = dashboard.message().unwrap();
    assert_eq!(banner.kind, BannerKind::Error);
    assert_eq!(banner.text, "Insufficient balance");
    assert_eq!(dashboard.amount().value(), "10");
    assert_eq!(dashboard.pin().value(), "9012");
    assert!(portal.next_refresh().is_none());
}

#[tokio::test]
async fn test_gateway_error_message_shown_verbatim() {
    let bank = MockBank::start().await;
    let storage = Arc::new(MemoryStorage::with_entries([(ROLE_KEY, "CUSTOMER"), (CARD_KEY, ALICE)]));
    let mut portal = start_portal(&bank, &storage).await;

    // over the mock gateway's single transaction limit: 400 with a message body
    transact(&mut portal, "20000", "1234").await;
    assert_eq!(bank.process_calls(), 1);

    let dashboard = customer(&mut portal);
    let banner = dashboard.message().unwrap();
    assert_eq!(banner.kind, BannerKind::Error);
    assert_eq!(banner.text, "Amount exceeds single transaction limit");
    assert_eq!(dashboard.amount().value(), "20000");
    assert_eq!(dashboard.pin().value(), "1234");
    assert!(dashboard.can_submit());
    assert!(portal.next_refresh().is_none());
    assert_eq!(bank.balance(ALICE), 100.0);
}

#[tokio::test]
async fn test_unreachable_gateway_shows_generic_failure() {
    let bank = MockBank::start().await;
    let storage = Arc::new(MemoryStorage::with_entries([(ROLE_KEY, "CUSTOMER"), (CARD_KEY, ALICE)]));

    let services = services_for(&dead_url().await, &bank.core_url);
    let mut portal = Portal::start(SessionStore::new(storage.clone()), services, None);
    portal.settle().await;

    transact(&mut portal, "5", "1234").await;
    let dashboard = customer(&mut portal);
    assert_eq!(dashboard.message().unwrap().text, "Transaction failed");
    assert_eq!(dashboard.pin().value(), "1234");
    assert_eq!(dashboard.amount().value(), "5");
}

#[tokio::test]
async fn test_customer_load_failure_keeps_previous_rows() {
    let bank = MockBank::start().await;
    bank.state.lock().seed(ALICE, 20.0);
    let storage = Arc::new(MemoryStorage::with_entries([(ROLE_KEY, "CUSTOMER"), (CARD_KEY, ALICE)]));
    let mut portal = start_portal(&bank, &storage).await;

    // details succeed, history fails: the whole load counts as failed
    bank.state.lock().history_failure = true;
    portal.refresh();
    assert!(customer(&mut portal).is_loading());
    portal.settle().await;

    let dashboard = customer(&mut portal);
    assert_eq!(dashboard.transactions().len(), 1);
    assert!(dashboard.details().is_some());
    assert_eq!(dashboard.message().unwrap().text, "Failed to load account data");
    assert!(!dashboard.is_loading());
}

// =============================================================================
// Admin dashboard
// =============================================================================

#[tokio::test]
async fn test_admin_filter_omitted_when_blank() {
    let bank = MockBank::start().await;
    {
        let mut state = bank.state.lock();
        state.seed(ALICE, 10.0);
        state.seed(BOB, 20.0);
    }
    let storage = Arc::new(MemoryStorage::with_entries([(ROLE_KEY, "ADMIN")]));
    let mut portal = start_portal(&bank, &storage).await;

    assert!(bank.state.lock().last_list_query.as_ref().unwrap().is_empty());
    assert_eq!(admin(&mut portal).transactions().len(), 2);

    admin(&mut portal).filter_mut().set(BOB);
    portal.refresh();
    portal.settle().await;
    assert_eq!(admin(&mut portal).transactions().len(), 1);
    assert_eq!(admin(&mut portal).transactions()[0].card_number, BOB);
    assert_eq!(
        bank.state.lock().last_list_query.as_ref().unwrap().get("cardNumber").map(String::as_str),
        Some(BOB)
    );

    admin(&mut portal).filter_mut().set("  ");
    portal.refresh();
    portal.settle().await;
    assert!(bank.state.lock().last_list_query.as_ref().unwrap().is_empty());

    admin(&mut portal).filter_mut().set("4000000000000000");
    portal.refresh();
    portal.settle().await;
    assert!(admin(&mut portal).shows_empty_row());
}

#[tokio::test]
async fn test_admin_load_failure_clears_rows() {
    let bank = MockBank::start().await;
    bank.state.lock().seed(ALICE, 10.0);
    let storage = Arc::new(MemoryStorage::with_entries([(ROLE_KEY, "ADMIN")]));
    let mut portal = start_portal(&bank, &storage).await;

    bank.state.lock().core_failure = Some((StatusCode::SERVICE_UNAVAILABLE, Some("Core unavailable")));
    portal.refresh();
    portal.settle().await;
    {
        let dashboard = admin(&mut portal);
        assert!(dashboard.transactions().is_empty());
        assert_eq!(dashboard.error(), Some("Core unavailable"));
        assert!(dashboard.shows_empty_row());
    }

    bank.state.lock().core_failure = Some((StatusCode::INTERNAL_SERVER_ERROR, None));
    portal.refresh();
    portal.settle().await;
    assert_eq!(admin(&mut portal).error(), Some("Failed to load transactions"));

    bank.state.lock().core_failure = None;
    portal.refresh();
    portal.settle().await;
    let dashboard = admin(&mut portal);
    assert_eq!(dashboard.error(), None);
    assert_eq!(dashboard.transactions().len(), 1);
}

// =============================================================================
// Logout
// =============================================================================

#[tokio::test]
async fn test_logout_clears_everything_for_any_role() {
    let bank = MockBank::start().await;
    for entries in [
        vec![(ROLE_KEY, "CUSTOMER"), (CARD_KEY, ALICE)],
        vec![(ROLE_KEY, "ADMIN")],
    ] {
        let storage = Arc::new(MemoryStorage::with_entries(entries));
        let mut portal = start_portal(&bank, &storage).await;
        assert_ne!(portal.route(), Route::Login);

        let mut changes = portal.session().subscribe();
        portal.logout();

        assert_eq!(portal.route(), Route::Login);
        assert_eq!(portal.session().current(), Session::default());
        assert_eq!(*changes.borrow_and_update(), Session::default());
        assert!(storage.entries().is_empty());
    }
}
