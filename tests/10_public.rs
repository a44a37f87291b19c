mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn root_returns_welcome_message() -> Result<()> {
    let server = common::start_server().await?;

    let (status, body) = server.get_json("/").await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Welcome to the Learning App API"}));
    Ok(())
}

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = common::start_server().await?;

    let (status, body) = server.get_json("/health").await?;

    assert_eq!(status, StatusCode::OK, "unexpected health body: {}", body);
    assert_eq!(body["status"], "ok");
    assert!(body.get("timestamp").is_some(), "missing timestamp: {}", body);
    Ok(())
}
