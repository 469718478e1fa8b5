//! Application layer for qlc-http-bridge.
//!
//! The application layer knows *what* to ask the controller, but delegates
//! *how* the bytes travel to the infrastructure layer through the
//! [`ControllerExchange`] trait.
//!
//! # Responsibilities
//!
//! - Defining the exchange seam and its error type
//! - Listing widgets, resolving names to IDs, reading and writing status
//!
//! # What does NOT belong here?
//!
//! - Opening sockets (that is infrastructure)
//! - HTTP routing and status codes (that is infrastructure)

pub mod exchange;
pub mod widget_service;

pub use exchange::{BoxError, ControllerError, ControllerExchange, ErrorKind, ExchangeStage};
pub use widget_service::{WidgetError, WidgetService};
