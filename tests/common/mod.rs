#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::{json, Value};

use expolink_api::clock::FixedClock;
use expolink_api::config::SecurityConfig;
use expolink_api::store::MemoryStore;
use expolink_api::{app, AppState};

pub const ADMIN_USERNAME: &str = "UbertAngel";
pub const ADMIN_PASSWORD: &str = "SpiritEmbassy12345678";

/// Date every test server treats as today. The demo New Year gathering is
/// still open then; Night of Bliss 2024 is long over.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 12, 1).expect("valid date")
}

/// Router served on an ephemeral port, backed by a fresh demo memory store
pub struct TestServer {
    pub base_url: String,
    pub client: Client,
}

impl TestServer {
    pub async fn start() -> Result<Self> {
        Self::start_with(MemoryStore::with_demo_data()).await
    }

    pub async fn start_with(store: MemoryStore) -> Result<Self> {
        let state = AppState::new(
            Arc::new(store),
            Arc::new(FixedClock(today())),
            SecurityConfig {
                cors_origins: vec!["*".to_string()],
                admin_username: ADMIN_USERNAME.to_string(),
                admin_password: ADMIN_PASSWORD.to_string(),
                jwt_secret: "integration-test-secret".to_string(),
                jwt_expiry_hours: 1,
            },
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .context("failed to bind test listener")?;
        let addr = listener.local_addr()?;

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app(state)).await {
                eprintln!("test server stopped: {}", e);
            }
        });

        let server = Self {
            base_url: format!("http://{}", addr),
            client: Client::new(),
        };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(25)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(self.url(path))
    }

    pub fn post(&self, path: &str) -> RequestBuilder {
        self.client.post(self.url(path))
    }

    pub fn put(&self, path: &str) -> RequestBuilder {
        self.client.put(self.url(path))
    }

    pub fn delete(&self, path: &str) -> RequestBuilder {
        self.client.delete(self.url(path))
    }

    /// Log in with the test credentials and return the bearer token
    pub async fn admin_token(&self) -> Result<String> {
        let res = self
            .post("/auth/login")
            .json(&json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());

        let body: Value = res.json().await?;
        body["data"]["token"]
            .as_str()
            .map(str::to_string)
            .context("login response carried no token")
    }
}

/// Read a response as JSON, returning its status alongside
pub async fn json_of(res: reqwest::Response) -> Result<(StatusCode, Value)> {
    let status = res.status();
    let body = res.json::<Value>().await?;
    Ok((status, body))
}
