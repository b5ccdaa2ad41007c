//! Router
//!
//! Maps a path and the session to one of three views. Protected views
//! redirect to login when the role doesn't authorize them; the customer view
//! additionally needs an active card.

use cardbank_types::{Role, Session};

/// Known paths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Customer,
    Admin,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Customer => "/customer",
            Self::Admin => "/admin",
        }
    }

    /// Match a path, ignoring one trailing slash
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = match path.strip_suffix('/') {
            Some(rest) if !rest.is_empty() => rest,
            _ => path,
        };
        match trimmed {
            "/login" => Some(Self::Login),
            "/customer" => Some(Self::Customer),
            "/admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Landing route for a session
    pub fn home(session: &Session) -> Self {
        match session.role {
            Some(Role::Customer) => Self::Customer,
            Some(Role::Admin) => Self::Admin,
            None => Self::Login,
        }
    }
}

/// What to show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Login,
    CustomerDashboard { card_number: String },
    AdminDashboard,
}

/// Outcome of routing a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub route: Route,
    pub view: View,
    /// The requested path was unknown or not authorized
    pub redirected: bool,
}

impl Resolution {
    fn to_login(redirected: bool) -> Self {
        Self {
            route: Route::Login,
            view: View::Login,
            redirected,
        }
    }
}

/// Resolve `path` against `session`
pub fn resolve(path: &str, session: &Session) -> Resolution {
    match Route::parse(path) {
        Some(Route::Login) => Resolution::to_login(false),
        Some(Route::Customer) => match (session.role, session.active_card()) {
            (Some(Role::Customer), Some(card)) => Resolution {
                route: Route::Customer,
                view: View::CustomerDashboard {
                    card_number: card.to_string(),
                },
                redirected: false,
            },
            _ => Resolution::to_login(true),
        },
        Some(Route::Admin) => match session.role {
            Some(Role::Admin) => Resolution {
                route: Route::Admin,
                view: View::AdminDashboard,
                redirected: false,
            },
            _ => Resolution::to_login(true),
        },
        None => Resolution::to_login(true),
    }
}
