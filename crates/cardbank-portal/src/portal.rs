//! Composition root
//!
//! [`Portal`] owns the session store, the authenticator and both API
//! clients, and decides which screen is showing. Views report outcomes; only
//! the portal touches the session.
//!
//! Nothing here waits on the network. Requests run as spawned tasks and
//! their results come back over a channel; [`Portal::tick`] applies whatever
//! has arrived. Results addressed to a screen that has since been replaced
//! are dropped.

use cardbank_auth::{AuthResult, Authenticator, Grant};
use cardbank_sdk::{CoreClient, GatewayClient, SdkResult};
use cardbank_types::{Transaction, TransactionResponse};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::admin::AdminDashboard;
use crate::customer::{AccountData, CustomerDashboard, DEFAULT_REFRESH_DELAY};
use crate::login::LoginView;
use crate::router::{self, Route, View};
use crate::session::SessionStore;

/// Collaborators injected into the portal
#[derive(Clone)]
pub struct PortalServices {
    pub core: CoreClient,
    pub gateway: GatewayClient,
    pub authenticator: Arc<dyn Authenticator>,
    pub refresh_delay: Duration,
}

impl PortalServices {
    pub fn new(
        core: CoreClient,
        gateway: GatewayClient,
        authenticator: Arc<dyn Authenticator>,
    ) -> Self {
        Self {
            core,
            gateway,
            authenticator,
            refresh_delay: DEFAULT_REFRESH_DELAY,
        }
    }

    pub fn with_refresh_delay(mut self, refresh_delay: Duration) -> Self {
        self.refresh_delay = refresh_delay;
        self
    }
}

/// The screen currently mounted
#[derive(Debug)]
pub enum Screen {
    Login(LoginView),
    Customer(CustomerDashboard),
    Admin(AdminDashboard),
}

/// A finished background request
enum Completion {
    Login(AuthResult<Grant>),
    CustomerLoad(SdkResult<AccountData>),
    CustomerSubmit(SdkResult<TransactionResponse>),
    AdminLoad(SdkResult<Vec<Transaction>>),
}

struct Delivery {
    /// Mount generation the request was issued from
    mount: u64,
    completion: Completion,
}

pub struct Portal {
    session: SessionStore,
    services: PortalServices,
    route: Route,
    screen: Screen,
    mount: u64,
    in_flight: usize,
    tx: mpsc::UnboundedSender<Delivery>,
    rx: mpsc::UnboundedReceiver<Delivery>,
}

impl Portal {
    /// Restore the previous session and mount the first screen.
    ///
    /// Without `requested_path` the restored role's home route is used; either
    /// way the path goes through the router's guards. A mounted dashboard
    /// starts loading in the background, so this must run inside a Tokio
    /// runtime.
    pub fn start(
        session: SessionStore,
        services: PortalServices,
        requested_path: Option<&str>,
    ) -> Self {
        if let Err(err) = session.restore_session() {
            tracing::warn!(error = %err, "Could not read persisted session, starting signed out");
        }

        let (tx, rx) = mpsc::unbounded_channel();
        let mut portal = Self {
            session,
            services,
            route: Route::Login,
            screen: Screen::Login(LoginView::new()),
            mount: 0,
            in_flight: 0,
            tx,
            rx,
        };

        let path = match requested_path {
            Some(path) => path.to_string(),
            None => Route::home(&portal.session.current()).path().to_string(),
        };
        portal.navigate(&path);
        portal
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    /// Whether any request is still outstanding
    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }

    /// Deadline of the customer dashboard's scheduled re-fetch
    pub fn next_refresh(&self) -> Option<Instant> {
        match &self.screen {
            Screen::Customer(dashboard) => dashboard.pending_refresh(),
            _ => None,
        }
    }

    /// Resolve `path` and mount the resulting screen. Dashboards start
    /// loading on mount.
    pub fn navigate(&mut self, path: &str) {
        let resolution = router::resolve(path, &self.session.current());
        if resolution.redirected {
            tracing::info!(requested = path, to = resolution.route.path(), "Redirecting");
        } else {
            tracing::debug!(path = resolution.route.path(), "Navigating");
        }

        self.mount += 1;
        self.route = resolution.route;
        self.screen = match resolution.view {
            View::Login => Screen::Login(LoginView::new()),
            View::CustomerDashboard { card_number } => Screen::Customer(CustomerDashboard::new(
                self.services.core.clone(),
                self.services.gateway.clone(),
                card_number,
                self.services.refresh_delay,
            )),
            View::AdminDashboard => Screen::Admin(AdminDashboard::new(self.services.core.clone())),
        };
        self.refresh();
    }

    /// Submit the login form. Returns whether a verification was started.
    pub fn submit_login(&mut self) -> bool {
        let Screen::Login(view) = &mut self.screen else {
            return false;
        };
        let Some(credentials) = view.begin_submit() else {
            return false;
        };

        let authenticator = self.services.authenticator.clone();
        self.spawn(
            async move { authenticator.verify(&credentials).await },
            Completion::Login,
        );
        true
    }

    fn login(&mut self, grant: Grant) {
        if let Err(err) = self
            .session
            .set_session(grant.role, grant.card_number.as_deref())
        {
            tracing::warn!(error = %err, "Session will not survive a restart");
        }
        let home = Route::home(&self.session.current());
        self.navigate(home.path());
    }

    /// Sign out from any screen
    pub fn logout(&mut self) {
        if let Err(err) = self.session.clear_session() {
            tracing::warn!(error = %err, "Could not erase persisted session");
        }
        self.navigate(Route::Login.path());
    }

    /// Reload the mounted dashboard; no-op on the login screen
    pub fn refresh(&mut self) {
        match &mut self.screen {
            Screen::Customer(dashboard) => {
                let request = dashboard.begin_load();
                self.spawn(request, Completion::CustomerLoad);
            }
            Screen::Admin(dashboard) => {
                let request = dashboard.begin_load();
                self.spawn(request, Completion::AdminLoad);
            }
            Screen::Login(_) => {}
        }
    }

    /// Submit the customer transaction form. Returns whether a request was
    /// sent; a blocked or invalid form is reported on the dashboard itself.
    pub fn submit_transaction(&mut self) -> bool {
        let Screen::Customer(dashboard) = &mut self.screen else {
            return false;
        };
        match dashboard.begin_submit() {
            Ok(request) => {
                self.spawn(request, Completion::CustomerSubmit);
                true
            }
            Err(outcome) => {
                tracing::debug!(?outcome, "Transaction not sent");
                false
            }
        }
    }

    /// Apply every result that has arrived and start a re-fetch that has
    /// come due. Returns whether anything changed.
    pub fn tick(&mut self) -> bool {
        let mut changed = false;
        while let Ok(delivery) = self.rx.try_recv() {
            self.in_flight -= 1;
            self.apply(delivery);
            changed = true;
        }

        if let Screen::Customer(dashboard) = &mut self.screen {
            if dashboard.take_due_refresh(Instant::now()) {
                let request = dashboard.begin_load();
                self.spawn(request, Completion::CustomerLoad);
                changed = true;
            }
        }
        changed
    }

    /// Wait until no request is outstanding, applying results as they
    /// arrive. A scheduled re-fetch is not waited for.
    pub async fn settle(&mut self) {
        while self.in_flight > 0 {
            let Some(delivery) = self.rx.recv().await else {
                break;
            };
            self.in_flight -= 1;
            self.apply(delivery);
        }
    }

    fn spawn<F, T>(&mut self, request: F, into: fn(T) -> Completion)
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        self.in_flight += 1;
        let tx = self.tx.clone();
        let mount = self.mount;
        tokio::spawn(async move {
            let completion = into(request.await);
            // the portal may be gone
            let _ = tx.send(Delivery { mount, completion });
        });
    }

    fn apply(&mut self, delivery: Delivery) {
        if delivery.mount != self.mount {
            tracing::debug!("Dropping response for a screen that is no longer mounted");
            return;
        }

        let grant = match (delivery.completion, &mut self.screen) {
            (Completion::Login(result), Screen::Login(view)) => view.finish_submit(result),
            (Completion::CustomerLoad(result), Screen::Customer(dashboard)) => {
                dashboard.finish_load(result);
                None
            }
            (Completion::CustomerSubmit(result), Screen::Customer(dashboard)) => {
                let outcome = dashboard.finish_submit(result);
                tracing::info!(?outcome, "Transaction answered");
                None
            }
            (Completion::AdminLoad(result), Screen::Admin(dashboard)) => {
                dashboard.finish_load(result);
                None
            }
            _ => None,
        };

        if let Some(grant) = grant {
            self.login(grant);
        }
    }
}
