//! Common test utilities for alertfeed integration tests
//!
//! Provides a mock alert WebSocket server that pushes arbitrary text
//! frames to every connected client.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, Notify};

/// A mock alert server for testing
///
/// Accepts WebSocket connections and broadcasts frames queued via
/// [`MockAlertServer::send_frame`] to all connected clients.
pub struct MockAlertServer {
    pub addr: SocketAddr,
    frame_tx: broadcast::Sender<String>,
    shutdown: Arc<Notify>,
}

impl MockAlertServer {
    /// Create and start a new mock server on an ephemeral port
    pub async fn start() -> Self {
        Self::bind("127.0.0.1:0").await
    }

    /// Create and start a new mock server on a specific port
    pub async fn start_on(port: u16) -> Self {
        Self::bind(&format!("127.0.0.1:{port}")).await
    }

    async fn bind(addr: &str) -> Self {
        let listener = TcpListener::bind(addr).await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (frame_tx, _) = broadcast::channel(64);
        let shutdown = Arc::new(Notify::new());
        let shutdown_clone = shutdown.clone();
        let frame_tx_clone = frame_tx.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    result = listener.accept() => {
                        match result {
                            Ok((stream, _)) => {
                                let frames = frame_tx_clone.subscribe();
                                let shutdown = shutdown_clone.clone();
                                tokio::spawn(async move {
                                    Self::handle_connection(stream, frames, shutdown).await;
                                });
                            }
                            Err(e) => {
                                eprintln!("Accept error: {}", e);
                                break;
                            }
                        }
                    }
                    _ = shutdown_clone.notified() => {
                        break;
                    }
                }
            }
        });

        Self {
            addr,
            frame_tx,
            shutdown,
        }
    }

    async fn handle_connection(
        stream: tokio::net::TcpStream,
        mut frames: broadcast::Receiver<String>,
        shutdown: Arc<Notify>,
    ) {
        use futures::{SinkExt, StreamExt};
        use tokio_tungstenite::accept_async;
        use tokio_tungstenite::tungstenite::Message;

        let ws_stream = match accept_async(stream).await {
            Ok(ws) => ws,
            Err(e) => {
                eprintln!("WebSocket handshake failed: {}", e);
                return;
            }
        };

        let (mut write, mut read) = ws_stream.split();

        loop {
            tokio::select! {
                frame = frames.recv() => {
                    match frame {
                        Ok(text) => {
                            if write.send(Message::Text(text)).await.is_err() {
                                break;
                            }
                        }
                        Err(broadcast::error::RecvError::Lagged(_)) => continue,
                        Err(broadcast::error::RecvError::Closed) => break,
                    }
                }
                msg = read.next() => {
                    match msg {
                        Some(Ok(msg)) if msg.is_close() => break,
                        Some(Ok(_)) => {}
                        Some(Err(_)) | None => break,
                    }
                }
                _ = shutdown.notified() => {
                    break;
                }
            }
        }
    }

    /// Get the WebSocket URL for this server
    pub fn ws_url(&self) -> String {
        format!("ws://{}", self.addr)
    }

    /// Queue a text frame for every connected client
    pub fn send_frame(&self, frame: impl Into<String>) {
        let _ = self.frame_tx.send(frame.into());
    }

    /// Shutdown the server and all open connections
    pub fn shutdown(&self) {
        self.shutdown.notify_waiters();
    }
}

impl Drop for MockAlertServer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Poll `cond` every 10ms until it holds or `timeout` elapses
pub async fn wait_for<F>(mut cond: F, timeout: Duration) -> bool
where
    F: FnMut() -> bool,
{
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if cond() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    cond()
}

/// Bind an ephemeral port and release it, returning the port number
///
/// Used to point a feed at a port with no listener yet.
pub async fn reserve_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}
