//! qlc-http-bridge library crate.
//!
//! This crate exposes the widgets of a QLC+ virtual console as a small REST
//! API.  Each HTTP call becomes exactly one (or, for name-based routes, two)
//! request/response exchanges over QLC+'s websocket API.
//!
//! # Architecture (clean architecture)
//!
//! ```text
//! HTTP client (curl, home automation, …)
//!         ↕
//! [qlc-http-bridge]
//!   ├── domain/            Pure types: BridgeConfig
//!   ├── application/       WidgetService: name lookup, status read/write
//!   └── infrastructure/
//!         ├── controller_conn/ One websocket exchange with QLC+ (tokio-tungstenite)
//!         ├── http_server/     REST routes and HTML index (axum)
//!         └── config_file/     Optional TOML configuration file
//!         ↕
//! QLC+ (pipe-delimited text frames over ws://<addr>/qlcplusWS)
//! ```
//!
//! # Layer rules
//!
//! - `domain` has no I/O and no async.
//! - `application` depends on `domain` and `qlc-core`, and reaches the
//!   controller only through the [`application::ControllerExchange`] trait.
//! - `infrastructure` depends on all other layers plus `tokio`, `tungstenite`
//!   and `axum`.

/// Domain layer: configuration types (no I/O).
pub mod domain;

/// Application layer: widget lookup and status operations.
pub mod application;

/// Infrastructure layer: websocket client, HTTP server, config file.
pub mod infrastructure;
