//! Test helpers for integration tests
//!
//! Provides a test server bound to an ephemeral port and a small WebSocket
//! client speaking the `{"event", "data"}` frame format.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use flexshare_common::AppConfig;
use flexshare_realtime::{create_app, create_realtime_state, RealtimeState};
use futures_util::{SinkExt, StreamExt};
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

/// How long to wait for an expected frame or state change
pub const TIMEOUT: Duration = Duration::from_secs(5);

/// How long to listen when asserting that nothing arrives
pub const QUIET_PERIOD: Duration = Duration::from_millis(200);

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    state: RealtimeState,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config()?).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let state = create_realtime_state(config);
        let app = create_app(state.clone());

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            state,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get the WebSocket URL for an optional user id
    pub fn socket_url(&self, user_id: Option<&str>) -> String {
        match user_id {
            Some(user_id) => format!("ws://{}/socket?userId={}", self.addr, user_id),
            None => format!("ws://{}/socket", self.addr),
        }
    }

    /// Shared server state, for inspecting the registry
    pub fn state(&self) -> &RealtimeState {
        &self.state
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a GET request with an `Origin` header
    pub async fn get_with_origin(&self, path: &str, origin: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).header("Origin", origin).send().await?)
    }

    /// Connect a client as `user_id` and wait until the server has admitted it
    pub async fn connect(&self, user_id: &str) -> Result<TestClient> {
        let previous = self.registered_session(user_id);
        let client = TestClient::connect(&self.socket_url(Some(user_id))).await?;

        self.wait_until(|state| {
            let current = state.connections().registry().get(user_id);
            current.is_some() && current != previous
        })
        .await?;

        Ok(client)
    }

    /// Connect a client to an arbitrary socket URL and wait for admission
    pub async fn connect_url(&self, url: &str) -> Result<TestClient> {
        let before = self.state.connections().connection_count();
        let client = TestClient::connect(url).await?;

        self.wait_until(|state| state.connections().connection_count() > before)
            .await?;

        Ok(client)
    }

    /// The session currently registered for a user
    pub fn registered_session(&self, user_id: &str) -> Option<String> {
        self.state.connections().registry().get(user_id)
    }

    /// Poll server state until `condition` holds
    pub async fn wait_until<F>(&self, condition: F) -> Result<()>
    where
        F: Fn(&RealtimeState) -> bool,
    {
        let deadline = tokio::time::Instant::now() + TIMEOUT;
        while !condition(&self.state) {
            if tokio::time::Instant::now() >= deadline {
                anyhow::bail!("Timed out waiting for server state");
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        Ok(())
    }
}

/// A WebSocket client for the realtime channel
pub struct TestClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestClient {
    /// Open a connection
    pub async fn connect(url: &str) -> Result<Self> {
        let (stream, _) = connect_async(url)
            .await
            .with_context(|| format!("Failed to connect to {url}"))?;
        Ok(Self { stream })
    }

    /// Send a raw text frame
    pub async fn send_text(&mut self, text: &str) -> Result<()> {
        self.stream.send(Message::Text(text.to_owned().into())).await?;
        Ok(())
    }

    /// Send an event with raw JSON data
    pub async fn emit(&mut self, event: &str, data: &str) -> Result<()> {
        self.send_text(&format!(r#"{{"event":"{event}","data":{data}}}"#))
            .await
    }

    /// Receive the next text frame as a string
    pub async fn recv_text(&mut self) -> Result<String> {
        loop {
            let msg = tokio::time::timeout(TIMEOUT, self.stream.next())
                .await
                .context("Timed out waiting for a frame")?
                .context("Connection closed")??;

            match msg {
                Message::Text(text) => return Ok(text.as_str().to_owned()),
                Message::Ping(_) | Message::Pong(_) => {}
                other => anyhow::bail!("Unexpected frame: {other:?}"),
            }
        }
    }

    /// Receive the next text frame as JSON
    pub async fn recv_json(&mut self) -> Result<Value> {
        let text = self.recv_text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Assert that no text frame arrives for [`QUIET_PERIOD`]
    pub async fn expect_silence(&mut self) -> Result<()> {
        match tokio::time::timeout(QUIET_PERIOD, self.stream.next()).await {
            Err(_) => Ok(()),
            Ok(Some(Ok(Message::Text(text)))) => {
                anyhow::bail!("Expected no frame, got: {}", text.as_str())
            }
            Ok(other) => anyhow::bail!("Expected no frame, got: {other:?}"),
        }
    }

    /// Close the connection
    pub async fn close(mut self) -> Result<()> {
        self.stream.close(None).await?;
        Ok(())
    }
}

/// Create a test configuration
pub fn test_config() -> Result<AppConfig> {
    let vars = HashMap::from([
        ("STRIPE_SECRET_KEY", "sk_test_integration"),
        ("CLOUDINARY_NAME", "flexshare-test"),
        ("CLOUDINARY_API_KEY", "test-key"),
        ("CLOUDINARY_SECRET", "test-secret"),
        ("PORT", "0"),
        ("HOST", "127.0.0.1"),
    ]);

    AppConfig::from_lookup(|key| vars.get(key).map(|v| (*v).to_string()))
        .map_err(|e| anyhow::anyhow!("Config error: {}", e))
}

/// Assert response status and parse JSON body
pub async fn assert_json(response: Response, expected_status: StatusCode) -> Result<Value> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}
