//! Bridge configuration types.
//!
//! [`BridgeConfig`] is the single source of truth for all runtime settings.
//! It is built once at startup from CLI arguments, environment variables and
//! an optional TOML file (see `main.rs`), then handed to the services that
//! need it.  There is no global client state: the HTTP handlers receive a
//! service built from this value.

use std::time::Duration;

use thiserror::Error;

use qlc_core::{DEFAULT_EXCHANGE_TIMEOUT, WEBSOCKET_PATH};

/// Default `host:port` of the QLC+ web server.
pub const DEFAULT_CONTROLLER_ADDR: &str = "localhost:9999";

/// Default `host:port` the HTTP API listens on.
pub const DEFAULT_HTTP_BIND_ADDR: &str = "localhost:8888";

/// A configuration value that cannot be used.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("controller address must not be empty")]
    EmptyControllerAddr,

    #[error("HTTP listen address must not be empty")]
    EmptyHttpBindAddr,

    #[error("exchange timeout must be greater than zero")]
    ZeroTimeout,
}

/// All runtime configuration for the bridge.
///
/// # Example
///
/// ```rust
/// use qlc_http_bridge::domain::BridgeConfig;
///
/// let cfg = BridgeConfig::default();
/// assert_eq!(cfg.controller_url(), "ws://localhost:9999/qlcplusWS");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    /// `host:port` of the QLC+ web server.
    ///
    /// Kept as a string rather than a `SocketAddr` so that hostnames such as
    /// `lighting-pc.local:9999` work.  Every exchange opens a new connection
    /// to this address.
    pub controller_addr: String,

    /// `host:port` the HTTP API binds to.
    pub http_bind_addr: String,

    /// Deadline applied separately to the websocket write and read.
    pub exchange_timeout: Duration,
}

impl BridgeConfig {
    /// Websocket URL of the QLC+ API, e.g. `ws://localhost:9999/qlcplusWS`.
    pub fn controller_url(&self) -> String {
        format!("ws://{}{}", self.controller_addr, WEBSOCKET_PATH)
    }

    /// Checks that every field holds a usable value.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.controller_addr.trim().is_empty() {
            return Err(ConfigError::EmptyControllerAddr);
        }
        if self.http_bind_addr.trim().is_empty() {
            return Err(ConfigError::EmptyHttpBindAddr);
        }
        if self.exchange_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}

impl Default for BridgeConfig {
    /// | Field            | Default          |
    /// |------------------|------------------|
    /// | controller_addr  | `localhost:9999` |
    /// | http_bind_addr   | `localhost:8888` |
    /// | exchange_timeout | 10 seconds       |
    fn default() -> Self {
        Self {
            controller_addr: DEFAULT_CONTROLLER_ADDR.to_string(),
            http_bind_addr: DEFAULT_HTTP_BIND_ADDR.to_string(),
            exchange_timeout: DEFAULT_EXCHANGE_TIMEOUT,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
