//! CardBank SDK - HTTP clients for the two backend authorities
//!
//! The portal talks to two services, distinguished only by base address:
//!
//! - the **gateway** ([`GatewayClient`]) accepts transaction submissions,
//! - the **core** ([`CoreClient`]) answers read-only account and
//!   transaction queries.
//!
//! # Quick Start
//!
//! ```ignore
//! use cardbank_sdk::{CoreClient, EndpointConfig};
//!
//! let core = CoreClient::new(EndpointConfig::core_default())?;
//! let details = core.card_details("4111111111111111").await?;
//! println!("{} has {}", details.customer_name, details.balance);
//! ```
//!
//! Neither client retries. A failure is returned to the caller immediately
//! and classified by [`SdkError`].

pub mod config;
pub mod core_api;
pub mod error;
pub mod gateway_api;
mod http;

pub use config::{EndpointConfig, DEFAULT_CORE_URL, DEFAULT_GATEWAY_URL};
pub use core_api::CoreClient;
pub use error::{SdkError, SdkResult};
pub use gateway_api::GatewayClient;

pub use cardbank_types::*;
