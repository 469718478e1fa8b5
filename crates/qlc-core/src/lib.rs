//! # qlc-core
//!
//! Shared library for the QLC+ HTTP bridge containing the websocket message
//! framing rules and the widget directory built from the controller's listing.
//!
//! It has zero dependencies on sockets, async runtimes, or HTTP frameworks.
//!
//! # Architecture overview (for beginners)
//!
//! QLC+ is a lighting-control application.  Besides its own UI it exposes a
//! small websocket API at `ws://<host>:<port>/qlcplusWS`.  Every message on
//! that socket is a single text frame made of `|`-separated fields:
//!
//! ```text
//! bridge → QLC+:  QLC+API|getWidgetStatus|7
//! QLC+  → bridge: QLC+API|getWidgetStatus|255
//! ```
//!
//! The reply starts by echoing what was asked, then carries the answer.  This
//! crate (`qlc-core`) defines:
//!
//! - **`protocol`** – How a request string is composed and how a reply is
//!   checked and unwrapped into its payload.
//!
//! - **`domain`** – The `WidgetDirectory`: the ID → name table rebuilt from
//!   the controller's flat `ID|Name|ID|Name…` listing, plus name lookup.

pub mod domain;
pub mod protocol;

// Re-export the most-used items at the crate root so callers can write
// `qlc_core::WidgetDirectory` instead of `qlc_core::domain::widget::WidgetDirectory`.
pub use domain::widget::{parse_widget_listing, Widget, WidgetDirectory};
pub use protocol::codec::{compose_request, unwrap_response, ProtocolError};
pub use protocol::messages::{
    DEFAULT_EXCHANGE_TIMEOUT, FIELD_SEPARATOR, GET_WIDGETS_LIST, GET_WIDGET_STATUS, WEBSOCKET_PATH,
};
