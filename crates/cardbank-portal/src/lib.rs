//! CardBank Portal - client state for the card-banking front end
//!
//! Everything a front end needs except pixels:
//!
//! ```text
//!                 ┌──────────────────────── Portal ────────────────────────┐
//!  key events ──▶ │ Router ──▶ LoginView | CustomerDashboard | AdminDashboard │
//!                 │   ▲                         │              │            │
//!                 │ SessionStore           GatewayClient     CoreClient      │
//!                 │   │ (watch + storage)     (writes)       (reads)         │
//!                 └───┼────────────────────────────────────────────────────┘
//!                     ▼
//!               session.json
//! ```
//!
//! The portal never computes balances or outcomes. It shows what the services
//! last returned and re-fetches after every accepted mutation.

pub mod admin;
pub mod customer;
pub mod input;
pub mod login;
pub mod portal;
pub mod router;
pub mod session;
pub mod storage;

pub use admin::AdminDashboard;
pub use customer::{
    AccountData, Banner, BannerKind, CustomerDashboard, CustomerField, SubmitOutcome,
};
pub use input::InputField;
pub use login::{LoginField, LoginMode, LoginView};
pub use portal::{Portal, PortalServices, Screen};
pub use router::{resolve, Resolution, Route, View};
pub use session::SessionStore;
pub use storage::{
    default_data_dir, FileStorage, MemoryStorage, SessionStorage, StorageError, StorageResult,
    CARD_KEY, ROLE_KEY,
};
