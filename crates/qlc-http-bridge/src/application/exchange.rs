//! The seam between the widget operations and the websocket transport.
//!
//! One *exchange* is a complete connect → write → read → close cycle against
//! QLC+.  The application layer only sees the [`ControllerExchange`] trait;
//! the real implementation lives in
//! `infrastructure::controller_conn::ControllerClient`, and tests substitute a
//! recording double.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use qlc_core::ProtocolError;

/// Boxed transport error, so this layer does not depend on the websocket crate.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Which step of an exchange ran past its deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeStage {
    Connect,
    Write,
    Read,
}

impl fmt::Display for ExchangeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExchangeStage::Connect => "connect",
            ExchangeStage::Write => "write",
            ExchangeStage::Read => "read",
        })
    }
}

/// Coarse classification of a [`ControllerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The transport could not be established or broke mid-exchange.
    Connection,
    /// A write or read deadline expired.
    Timeout,
    /// The reply did not match the framing rules.
    Protocol,
}

/// Errors from a single exchange.  None of them are retried.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// The websocket handshake with QLC+ failed.
    #[error("failed to connect to QLC+ at {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: BoxError,
    },

    /// Sending or receiving a frame failed after the connection was open.
    #[error("websocket transport error while exchanging {sent:?}: {source}")]
    Transport {
        sent: String,
        #[source]
        source: BoxError,
    },

    /// QLC+ closed the connection without answering.
    #[error("QLC+ closed the connection before replying to {sent:?}")]
    Closed { sent: String },

    /// A deadline expired.
    ///
    /// Writing a value a widget already has produces no reply, so this is
    /// also what such a write ends with.
    #[error("timed out after {timeout:?} during {stage} of {sent:?}")]
    Timeout {
        stage: ExchangeStage,
        timeout: Duration,
        sent: String,
    },

    /// The reply was not a well-formed answer to the request.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

impl ControllerError {
    /// Returns the coarse error kind used for logging and HTTP status mapping.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ControllerError::Connect { .. }
            | ControllerError::Transport { .. }
            | ControllerError::Closed { .. } => ErrorKind::Connection,
            ControllerError::Timeout { .. } => ErrorKind::Timeout,
            ControllerError::Protocol(_) => ErrorKind::Protocol,
        }
    }
}

/// Performs one request/response exchange with the controller.
#[async_trait]
pub trait ControllerExchange: Send + Sync {
    /// Sends `prefix` (followed by `|value` when `value` is non-empty) and
    /// returns the reply with the echoed `prefix|` removed.
    async fn exchange(&self, prefix: &str, value: &str) -> Result<String, ControllerError>;
}

// ── Tests ─────────────────────────────────────────────────────────────────────
