//! Mock QLC+ controller shared by the integration tests.
//!
//! Binds a websocket server on `127.0.0.1:0`, records every text frame it
//! receives, and answers each one according to a test-supplied closure.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio_tungstenite::{accept_async, tungstenite::Message as WsMessage};

use qlc_http_bridge::domain::BridgeConfig;

/// What the mock does after receiving a text frame.
pub enum Reply {
    /// Answer with one text frame.
    Text(String),
    /// Answer with one binary frame.
    Binary(Vec<u8>),
    /// Send a ping and an unsolicited pong, then answer with one text frame.
    PingThenText(String),
    /// Say nothing and keep the connection open (QLC+'s no-op write).
    Silent,
    /// Close the connection without answering.
    Close,
}

pub struct MockController {
    pub addr: SocketAddr,
    received: Arc<Mutex<Vec<String>>>,
    connections: Arc<AtomicUsize>,
    closed: Arc<AtomicUsize>,
}

impl MockController {
    /// Starts the mock; `respond` is called once per received text frame.
    pub async fn start<F>(respond: F) -> Self
    where
        F: Fn(&str) -> Reply + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let respond = Arc::new(respond);
        let received = Arc::new(Mutex::new(Vec::new()));
        let connections = Arc::new(AtomicUsize::new(0));
        let closed = Arc::new(AtomicUsize::new(0));

        let (received_srv, connections_srv, closed_srv) = (
            Arc::clone(&received),
            Arc::clone(&connections),
            Arc::clone(&closed),
        );
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                connections_srv.fetch_add(1, Ordering::SeqCst);
                let respond = Arc::clone(&respond);
                let received = Arc::clone(&received_srv);
                let closed = Arc::clone(&closed_srv);
                tokio::spawn(async move {
                    let Ok(mut ws) = accept_async(stream).await else {
                        return;
                    };
                    while let Some(Ok(msg)) = ws.next().await {
                        let text = match msg {
                            WsMessage::Text(text) => text,
                            WsMessage::Close(_) => break,
                            _ => continue,
                        };
                        received.lock().unwrap().push(text.clone());
                        match (*respond)(&text) {
                            Reply::Text(reply) => {
                                if ws.send(WsMessage::Text(reply)).await.is_err() {
                                    break;
                                }
                            }
                            Reply::Binary(data) => {
                                if ws.send(WsMessage::Binary(data)).await.is_err() {
                                    break;
                                }
                            }
                            Reply::PingThenText(reply) => {
                                let frames = [
                                    WsMessage::Ping(b"hb".to_vec()),
                                    WsMessage::Pong(Vec::new()),
                                    WsMessage::Text(reply),
                                ];
                                let mut failed = false;
                                for frame in frames {
                                    if ws.send(frame).await.is_err() {
                                        failed = true;
                                        break;
                                    }
                                }
                                if failed {
                                    break;
                                }
                            }
                            Reply::Silent => {}
                            Reply::Close => {
                                let _ = ws.close(None).await;
                                break;
                            }
                        }
                    }
                    closed.fetch_add(1, Ordering::SeqCst);
                });
            }
        });

        Self {
            addr,
            received,
            connections,
            closed,
        }
    }

    /// Bridge configuration pointing at this mock with the given deadline.
    pub fn config(&self, timeout: Duration) -> BridgeConfig {
        BridgeConfig {
            controller_addr: self.addr.to_string(),
            exchange_timeout: timeout,
            ..BridgeConfig::default()
        }
    }

    /// Text frames received so far, in arrival order.
    pub fn received(&self) -> Vec<String> {
        self.received.lock().unwrap().clone()
    }

    /// Number of websocket connections accepted so far.
    pub fn connections(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }

    /// Waits up to one second for `n` connections to have ended.
    pub async fn wait_closed(&self, n: usize) -> bool {
        for _ in 0..100 {
            if self.closed.load(Ordering::SeqCst) >= n {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        false
    }
}

/// Answers the two fixed commands the way QLC+ does for a console with
/// widgets `1 = Fader1` and `2 = Fader2`, and echoes raw writes.
pub fn two_faders(request: &str) -> Reply {
    match request {
        "QLC+API|getWidgetsList" => {
            Reply::Text("QLC+API|getWidgetsList|1|Fader1|2|Fader2".into())
        }
        "QLC+API|getWidgetStatus|1" => Reply::Text("QLC+API|getWidgetStatus|42".into()),
        "QLC+API|getWidgetStatus|2" => Reply::Text("QLC+API|getWidgetStatus|0".into()),
        write => Reply::Text(write.to_string()),
    }
}
