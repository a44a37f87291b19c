#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::Value;
use tempfile::TempDir;

pub const TEST_API_KEY: &str = "integration-test-key";

/// A server process with its own decks directory; killed on drop
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    decks: TempDir,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);
        let decks = TempDir::new().context("failed to create decks directory")?;

        // Cargo builds the binary for integration tests and exposes its path
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_learning-app-api"));
        cmd.env("APP_ENV", "development")
            .env("LEARNING_API_KEY", TEST_API_KEY)
            .env("LEARNING_API_HOST", "127.0.0.1")
            .env("LEARNING_API_PORT", port.to_string())
            .env("DECKS_DIR", decks.path().join("decks"))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self {
            port,
            base_url,
            decks,
            child,
        })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK || resp.status() == StatusCode::SERVICE_UNAVAILABLE {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Directory the server writes decks into
    pub fn decks_dir(&self) -> PathBuf {
        self.decks.path().join("decks")
    }

    pub fn deck_file(&self, filename: &str) -> PathBuf {
        self.decks_dir().join(filename)
    }

    /// Number of entries in the decks directory (0 if it was never created)
    pub fn stored_file_count(&self) -> usize {
        count_entries(&self.decks_dir())
    }

    /// POST a raw body to /api/decks with an optional key
    pub async fn post_deck(&self, key: Option<&str>, body: impl Into<reqwest::Body>) -> Result<(StatusCode, Value)> {
        let mut request = reqwest::Client::new()
            .post(self.url("/api/decks"))
            .header("content-type", "application/json")
            .body(body);
        if let Some(key) = key {
            request = request.header("X-API-Key", key);
        }

        let res = request.send().await?;
        let status = res.status();
        let body = res.json::<Value>().await?;
        Ok((status, body))
    }

    pub async fn get_json(&self, path: &str) -> Result<(StatusCode, Value)> {
        let res = reqwest::get(self.url(path)).await?;
        let status = res.status();
        let body = res.json::<Value>().await?;
        Ok((status, body))
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

fn count_entries(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
}

pub async fn start_server() -> Result<TestServer> {
    let server = TestServer::spawn()?;
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}
