#![allow(dead_code)]

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::Value;

use linkshelf::config::{AppConfig, DatabaseConfig};
use linkshelf::database::Database;
use linkshelf::AppState;

pub const PASSWORD: &str = "secret";

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `path` with the correct password appended
    pub fn authed(&self, path: &str) -> String {
        let sep = if path.contains('?') { '&' } else { '?' };
        format!("{}{}{}password={}", self.base_url, path, sep, PASSWORD)
    }

    pub async fn create_category(&self, name: &str) -> Result<Value> {
        let res = self
            .client
            .post(self.authed("/api/categories"))
            .json(&serde_json::json!({ "name": name }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "create category: {}", res.status());
        Ok(res.json().await?)
    }

    pub async fn create_bookmark(&self, body: Value) -> Result<Value> {
        let res = self
            .client
            .post(self.authed("/api/bookmarks"))
            .json(&body)
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "create bookmark: {}", res.status());
        Ok(res.json().await?)
    }

    pub async fn get_json(&self, url: String) -> Result<(StatusCode, Value)> {
        let res = self.client.get(url).send().await?;
        let status = res.status();
        Ok((status, res.json().await?))
    }
}

/// Boot the app in-process on a free port, backed by a private in-memory database
pub async fn spawn_server() -> Result<TestServer> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let base_url = format!("http://127.0.0.1:{}", port);

    let mut config = AppConfig::default();
    config.auth.password = PASSWORD.to_string();
    config.site.title = "Test Shelf".to_string();
    config.site.static_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static");
    config.database = DatabaseConfig::in_memory();

    let db = Database::open(&config.database).await?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    let state = AppState::new(db, &config);
    tokio::spawn(linkshelf::serve(listener, state, std::future::pending()));

    let server = TestServer {
        port,
        base_url,
        client: reqwest::Client::new(),
    };
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}
