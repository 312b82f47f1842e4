//! Test fixtures: an in-process server on an ephemeral port plus WebSocket helpers.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use shukkin_server::{
    build_router,
    domain::{ChannelId, EmployeeId},
    infrastructure::{ConnectionRegistry, InMemoryAttendanceRepository, SystemClock},
    ui::AppState,
};
use shukkin_shared::time::offset_from_minutes;
use tokio::{net::TcpStream, task::JoinHandle};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, tungstenite::Message};

pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

const TIMEOUT: Duration = Duration::from_secs(5);

pub struct TestServer {
    addr: SocketAddr,
    pub repository: Arc<InMemoryAttendanceRepository>,
    pub registry: Arc<ConnectionRegistry>,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start the server with days cut at UTC midnight
    pub async fn start() -> Self {
        let repository = Arc::new(InMemoryAttendanceRepository::new());
        let registry = Arc::new(ConnectionRegistry::new());
        let clock = Arc::new(SystemClock::new(offset_from_minutes(0).unwrap()));
        let state = Arc::new(AppState::new(repository.clone(), registry.clone(), clock));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");
        let app = build_router(state);
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server failed");
        });

        Self {
            addr,
            repository,
            registry,
            handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    /// Open a WebSocket and consume the `connected` event; returns the channel id
    pub async fn connect_ws(&self) -> (WsStream, String) {
        let (mut ws, _) = tokio_tungstenite::connect_async(self.ws_url())
            .await
            .expect("Failed to connect WebSocket");
        let connected = next_event(&mut ws).await;
        assert_eq!(connected["event"], "connected");
        let id = connected["data"]["id"]
            .as_str()
            .expect("connected event without id")
            .to_string();
        (ws, id)
    }

    /// Wait until `employee` is bound to `channel` in the registry
    pub async fn wait_for_registration(&self, employee: &str, channel: &str) {
        let employee = EmployeeId::new(employee.to_string()).unwrap();
        let channel = ChannelId::new(channel.to_string()).unwrap();
        tokio::time::timeout(TIMEOUT, async {
            loop {
                if self.registry.channel_for(&employee).await.as_ref() == Some(&channel) {
                    return;
                }
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("Registration did not happen in time");
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub async fn send_event(ws: &mut WsStream, event: Value) {
    ws.send(Message::Text(event.to_string().into()))
        .await
        .expect("Failed to send event");
}

/// Next JSON event, skipping pings
pub async fn next_event(ws: &mut WsStream) -> Value {
    tokio::time::timeout(TIMEOUT, async {
        loop {
            match ws.next().await {
                Some(Ok(Message::Text(text))) => {
                    return serde_json::from_str(text.as_str()).expect("Invalid JSON event");
                }
                Some(Ok(Message::Close(_))) | None => panic!("WebSocket closed unexpectedly"),
                Some(Ok(_)) => continue,
                Some(Err(e)) => panic!("WebSocket error: {e}"),
            }
        }
    })
    .await
    .expect("Timed out waiting for event")
}

/// Wait for the server to close the socket, ignoring any queued events
pub async fn expect_closed(ws: &mut WsStream) {
    tokio::time::timeout(TIMEOUT, async {
        loop {
            match ws.next().await {
                Some(Ok(Message::Close(_))) | None | Some(Err(_)) => return,
                Some(Ok(_)) => continue,
            }
        }
    })
    .await
    .expect("Socket was not closed in time");
}
