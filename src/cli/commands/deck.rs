use clap::Subcommand;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use std::path::PathBuf;

use crate::auth::API_KEY_HEADER;
use crate::cli::utils::{deck_summary, output_error, output_json, output_success, read_file};
use crate::cli::OutputFormat;
use crate::handlers::protected::DeckWriteResponse;
use crate::schema::parse_deck_bytes;
use crate::storage::deck_filename;

#[derive(Subcommand)]
pub enum DeckCommands {
    #[command(about = "Validate a deck JSON file and print the normalized deck")]
    Validate {
        #[arg(help = "Path to the deck JSON file")]
        file: PathBuf,
    },

    #[command(about = "Upload a deck JSON file to a running server")]
    Push {
        #[arg(help = "Path to the deck JSON file")]
        file: PathBuf,
        #[arg(long, env = "LEARNING_API_URL", default_value = "http://127.0.0.1:8000", help = "Server base URL")]
        server: String,
        #[arg(long, env = "LEARNING_API_KEY", hide_env_values = true, help = "Shared API key")]
        api_key: String,
    },
}

pub async fn handle(cmd: DeckCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        DeckCommands::Validate { file } => validate(file, output_format),
        DeckCommands::Push { file, server, api_key } => push(file, &server, &api_key, output_format).await,
    }
}

fn validate(file: PathBuf, output_format: OutputFormat) -> anyhow::Result<()> {
    let bytes = read_file(&file)?;

    match parse_deck_bytes(&bytes) {
        Ok(deck) => match output_format {
            OutputFormat::Json => output_json(&deck),
            OutputFormat::Text => {
                println!("✓ {}", deck_summary(&deck));
                println!("  would be stored as {}", deck_filename(&deck.title));
                Ok(())
            }
        },
        Err(err) => {
            let details: Vec<String> = err.errors.iter().map(ToString::to_string).collect();
            output_error(output_format, &format!("{} is not a valid deck", file.display()), &details)?;
            anyhow::bail!("{} validation error(s)", err.errors.len())
        }
    }
}

async fn push(file: PathBuf, server: &str, api_key: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let bytes = read_file(&file)?;

    // Fail fast locally; the server runs the same validation
    if let Err(err) = parse_deck_bytes(&bytes) {
        let details: Vec<String> = err.errors.iter().map(ToString::to_string).collect();
        output_error(output_format, &format!("{} is not a valid deck", file.display()), &details)?;
        anyhow::bail!("{} validation error(s)", err.errors.len());
    }

    let url = format!("{}/api/decks", server.trim_end_matches('/'));
    tracing::debug!("POST {}", url);

    let response = reqwest::Client::new()
        .post(&url)
        .header(API_KEY_HEADER, api_key)
        .header(CONTENT_TYPE, "application/json")
        .body(bytes)
        .send()
        .await?;

    let status = response.status();
    let body: Value = response.json().await.unwrap_or(Value::Null);

    if !status.is_success() {
        let detail = body
            .get("detail")
            .map(|d| match d {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .unwrap_or_else(|| status.to_string());
        output_error(output_format, &format!("server rejected deck ({})", status), &[detail])?;
        anyhow::bail!("upload failed with status {}", status);
    }

    let written: DeckWriteResponse = serde_json::from_value(body)?;
    output_success(
        output_format,
        &format!("{} ({})", written.message, written.filename),
        Some(serde_json::to_value(&written)?),
    )
}
