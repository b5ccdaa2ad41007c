//! Session Store
//!
//! The single owner of "who is signed in". Memory state is published on a
//! `watch` channel so any view can observe it; every change is mirrored to
//! durable storage.

use cardbank_types::{Role, Session};
use std::sync::Arc;
use tokio::sync::watch;

use crate::storage::{SessionStorage, StorageResult, CARD_KEY, ROLE_KEY};

/// Observable session state backed by durable storage
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    state: watch::Sender<Session>,
}

impl SessionStore {
    /// Create a signed-out store over `storage`. Call
    /// [`restore_session`](Self::restore_session) to pick up a previous run.
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        let (state, _) = watch::channel(Session::default());
        Self { storage, state }
    }

    /// Current in-memory session
    pub fn current(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Receive every future session change
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Establish a session. The card identifier is only kept for customers.
    ///
    /// Memory is updated even if persisting fails; the error is returned so
    /// the caller can report that the session won't survive a restart.
    pub fn set_session(&self, role: Role, card_number: Option<&str>) -> StorageResult<()> {
        let card_number = match role {
            Role::Customer => card_number.filter(|c| !c.is_empty()).map(str::to_string),
            Role::Admin => None,
        };

        self.state.send_replace(Session {
            role: Some(role),
            card_number: card_number.clone(),
        });
        tracing::info!(%role, "Session established");

        self.storage.set(ROLE_KEY, role.as_str())?;
        match card_number {
            Some(card) => self.storage.set(CARD_KEY, &card),
            None => self.storage.remove(CARD_KEY),
        }
    }

    /// Erase the session from memory and storage
    pub fn clear_session(&self) -> StorageResult<()> {
        self.state.send_replace(Session::default());
        tracing::info!("Session cleared");
        self.storage.clear()
    }

    /// Hydrate memory from storage.
    ///
    /// Restored values are trusted as-is; a stale card is only discovered
    /// when the backend rejects it. A role string that doesn't parse counts
    /// as no role.
    pub fn restore_session(&self) -> StorageResult<Session> {
        let role = match self.storage.get(ROLE_KEY)? {
            Some(raw) if raw.is_empty() => None,
            Some(raw) => match raw.parse::<Role>() {
                Ok(role) => Some(role),
                Err(err) => {
                    tracing::warn!(error = %err, "Ignoring persisted role");
                    None
                }
            },
            None => None,
        };

        let Some(role) = role else {
            tracing::debug!("No persisted session");
            return Ok(self.current());
        };

        let card_number = self
            .storage
            .get(CARD_KEY)?
            .filter(|card| !card.is_empty());
        let session = Session {
            role: Some(role),
            card_number,
        };
        tracing::info!(%role, has_card = session.card_number.is_some(), "Session restored");
        self.state.send_replace(session.clone());
        Ok(session)
    }
}
