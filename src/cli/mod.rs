pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "learn")]
#[command(about = "Learning App CLI - validate, upload and inspect learning decks")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Validate deck files and upload them to a server")]
    Deck {
        #[command(subcommand)]
        cmd: commands::deck::DeckCommands,
    },

    #[command(about = "Inspect decks stored in a local decks directory")]
    Library {
        #[command(subcommand)]
        cmd: commands::library::LibraryCommands,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Deck { cmd } => commands::deck::handle(cmd, output_format).await,
        Commands::Library { cmd } => commands::library::handle(cmd, output_format).await,
    }
}
