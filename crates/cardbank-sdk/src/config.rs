//! Endpoint configuration

use std::time::Duration;

/// Default gateway authority (transaction submission)
pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:8081/api/v1";

/// Default core authority (read-only queries)
pub const DEFAULT_CORE_URL: &str = "http://localhost:8082/api/v2/banking";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where one authority lives and how long to wait for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    /// Base address; request paths are appended to it
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl EndpointConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn gateway_default() -> Self {
        Self::new(DEFAULT_GATEWAY_URL)
    }

    pub fn core_default() -> Self {
        Self::new(DEFAULT_CORE_URL)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
