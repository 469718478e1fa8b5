//! Websocket client for the QLC+ API.
//!
//! Every call to [`ControllerClient::exchange`] is a complete, independent
//! cycle:
//!
//! ```text
//! connect ws://<addr>/qlcplusWS
//!   → write one text frame     (deadline)
//!   → read one text frame      (deadline)
//!   → close
//! ```
//!
//! No connection is kept between calls and nothing is retried.  Concurrent
//! HTTP requests therefore open concurrent connections to QLC+.
//!
//! # The silent no-op write
//!
//! QLC+ does not answer a write whose value equals the widget's current
//! value.  The read then waits until the deadline and the exchange fails
//! with [`ControllerError::Timeout`] in the `read` stage.  That is the
//! controller's behaviour and is reported as-is.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{Error as WsError, Message as WsMessage},
    MaybeTlsStream, WebSocketStream,
};
use tracing::debug;

use qlc_core::{compose_request, unwrap_response, ProtocolError};

use crate::application::exchange::{ControllerError, ControllerExchange, ExchangeStage};
use crate::domain::config::BridgeConfig;

type ControllerStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Connection descriptor for one QLC+ instance.
///
/// Holds only the URL and the deadline; it is cheap to clone and safe to
/// share between concurrent requests.
#[derive(Debug, Clone)]
pub struct ControllerClient {
    url: String,
    timeout: Duration,
}

impl ControllerClient {
    /// Creates a client for the controller described by `config`.
    pub fn new(config: &BridgeConfig) -> Self {
        Self {
            url: config.controller_url(),
            timeout: config.exchange_timeout,
        }
    }

    /// Websocket URL every exchange connects to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Deadline applied to each stage of an exchange.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Opens a fresh websocket connection.
    async fn open(&self, sent: &str) -> Result<ControllerStream, ControllerError> {
        let (ws, _response) = timeout(self.timeout, connect_async(self.url.as_str()))
            .await
            .map_err(|_| self.timed_out(ExchangeStage::Connect, sent))?
            .map_err(|e| ControllerError::Connect {
                url: self.url.clone(),
                source: Box::new(e),
            })?;
        debug!("connected to QLC+ at {}", self.url);
        Ok(ws)
    }

    /// Writes `sent` as one text frame and waits for one text frame back.
    async fn write_read(
        &self,
        ws: &mut ControllerStream,
        sent: &str,
    ) -> Result<String, ControllerError> {
        timeout(self.timeout, ws.send(WsMessage::Text(sent.to_string())))
            .await
            .map_err(|_| self.timed_out(ExchangeStage::Write, sent))?
            .map_err(|e| transport_error(e, sent))?;
        debug!("→ QLC+: {sent}");

        let reply = timeout(self.timeout, read_reply(ws, sent))
            .await
            .map_err(|_| self.timed_out(ExchangeStage::Read, sent))??;
        debug!("← QLC+: {reply}");
        Ok(reply)
    }

    fn timed_out(&self, stage: ExchangeStage, sent: &str) -> ControllerError {
        ControllerError::Timeout {
            stage,
            timeout: self.timeout,
            sent: sent.to_string(),
        }
    }
}

#[async_trait]
impl ControllerExchange for ControllerClient {
    async fn exchange(&self, prefix: &str, value: &str) -> Result<String, ControllerError> {
        let sent = compose_request(prefix, value)?;
        let mut ws = self.open(&sent).await?;

        let outcome = self.write_read(&mut ws, &sent).await;

        // Close on every path once the socket is open.
        match timeout(self.timeout, ws.close(None)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => debug!("closing QLC+ connection failed: {e}"),
            Err(_) => debug!("closing QLC+ connection timed out"),
        }

        let reply = outcome?;
        let payload = unwrap_response(prefix, &sent, &reply)?;
        Ok(payload.to_string())
    }
}

/// Reads frames until the first text frame, skipping control frames.
async fn read_reply(ws: &mut ControllerStream, sent: &str) -> Result<String, ControllerError> {
    while let Some(frame) = ws.next().await {
        match frame.map_err(|e| transport_error(e, sent))? {
            WsMessage::Text(text) => return Ok(text),
            WsMessage::Binary(data) => {
                return Err(ProtocolError::BinaryFrame {
                    sent: sent.to_string(),
                    len: data.len(),
                }
                .into())
            }
            WsMessage::Close(frame) => {
                debug!("QLC+ sent close frame: {frame:?}");
                break;
            }
            WsMessage::Ping(_) | WsMessage::Pong(_) | WsMessage::Frame(_) => {
                debug!("skipping websocket control frame while waiting for reply");
            }
        }
    }
    Err(ControllerError::Closed {
        sent: sent.to_string(),
    })
}

fn transport_error(e: WsError, sent: &str) -> ControllerError {
    match e {
        WsError::ConnectionClosed | WsError::AlreadyClosed => ControllerError::Closed {
            sent: sent.to_string(),
        },
        other => ControllerError::Transport {
            sent: sent.to_string(),
            source: Box::new(other),
        },
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
//
// Exchanges against a live mock controller are in `tests/controller_exchange.rs`.
