//! Infrastructure layer for qlc-http-bridge.
//!
//! The infrastructure layer handles all I/O.
//!
//! # Responsibilities
//!
//! - Opening one websocket connection to QLC+ per exchange
//! - Enforcing the write and read deadlines
//! - Serving the REST API and HTML index over HTTP
//! - Reading the optional TOML configuration file
//!
//! # What does NOT belong here?
//!
//! - Name resolution and listing logic (that is the application layer)
//! - Framing rules (that is `qlc-core`)

pub mod config_file;
pub mod controller_conn;
pub mod http_server;

// Re-export the primary entry points so `main.rs` can call them concisely.
pub use controller_conn::ControllerClient;
pub use http_server::{router, run_server};
