use std::net::SocketAddr;
use std::time::Duration;

use agenthub_server::build_app;
use agenthub_server::config::{IncidentsConfig, PlaygroundConfig, ServerConfig};
use agenthub_server::state::AppState;

pub struct TestServer {
    pub addr: SocketAddr,
    pub state: AppState,
    _shutdown: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Start a test server with default config except for short simulated
    /// delays.
    pub async fn new() -> Self {
        Self::from_config(fast_config()).await
    }

    pub async fn from_config(config: ServerConfig) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (app, state) = build_app(config);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the server a moment to start accepting
        tokio::time::sleep(Duration::from_millis(20)).await;

        Self {
            addr,
            state,
            _shutdown: handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn api(&self, path: &str) -> String {
        format!("http://{}/api/v1{path}", self.addr)
    }
}

/// Defaults with simulated latencies cut down to keep tests quick.
pub fn fast_config() -> ServerConfig {
    ServerConfig {
        playground: PlaygroundConfig {
            simulated_latency_ms: 50,
            ..PlaygroundConfig::default()
        },
        incidents: IncidentsConfig {
            rollback_duration_ms: 50,
        },
        ..ServerConfig::default()
    }
}

pub async fn get_json(url: &str) -> (u16, serde_json::Value) {
    let resp = reqwest::get(url).await.unwrap();
    let status = resp.status().as_u16();
    (status, resp.json().await.unwrap_or(serde_json::Value::Null))
}

pub async fn post_json(url: &str, body: Option<serde_json::Value>) -> (u16, serde_json::Value) {
    let client = reqwest::Client::new();
    let mut req = client.post(url);
    if let Some(body) = body {
        req = req.json(&body);
    }
    let resp = req.send().await.unwrap();
    let status = resp.status().as_u16();
    (status, resp.json().await.unwrap_or(serde_json::Value::Null))
}

/// Poll `url` until `check` accepts the JSON body or two seconds pass.
pub async fn wait_for_json(
    url: &str,
    check: impl Fn(&serde_json::Value) -> bool,
) -> serde_json::Value {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    loop {
        let (_, body) = get_json(url).await;
        if check(&body) || tokio::time::Instant::now() >= deadline {
            return body;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}
