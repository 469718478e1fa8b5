//! Domain layer for qlc-http-bridge.
//!
//! The domain layer contains pure types that have no dependencies on I/O,
//! networking, or external frameworks.
//!
//! # What belongs in the domain layer?
//!
//! - Configuration structures and their validation rules
//!
//! # What does NOT belong here?
//!
//! - Any `tokio`, `WebSocket` or `axum` types
//! - File I/O or environment variable reading

pub mod config;

pub use config::{BridgeConfig, ConfigError};
