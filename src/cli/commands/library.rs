use clap::Subcommand;
use std::path::{Path, PathBuf};

use crate::cli::utils::{deck_summary, output_json};
use crate::cli::OutputFormat;
use crate::models::{generate_flashcards, Deck};
use crate::storage::DeckStore;

#[derive(Subcommand)]
pub enum LibraryCommands {
    #[command(about = "List every deck in the decks directory")]
    List {
        #[arg(long, env = "DECKS_DIR", default_value = "shared/data/decks", help = "Decks directory")]
        dir: PathBuf,
    },

    #[command(about = "Show one stored deck")]
    Show {
        #[arg(help = "Deck file name without .json (e.g. spanish-basics)")]
        name: String,
        #[arg(long, env = "DECKS_DIR", default_value = "shared/data/decks", help = "Decks directory")]
        dir: PathBuf,
    },

    #[command(about = "Print the flashcards generated from a stored deck")]
    Flashcards {
        #[arg(help = "Deck file name without .json (e.g. spanish-basics)")]
        name: String,
        #[arg(long, env = "DECKS_DIR", default_value = "shared/data/decks", help = "Decks directory")]
        dir: PathBuf,
    },
}

pub async fn handle(cmd: LibraryCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        LibraryCommands::List { dir } => {
            let entries = DeckStore::new(dir).list().await?;
            match output_format {
                OutputFormat::Json => output_json(&entries),
                OutputFormat::Text => {
                    if entries.is_empty() {
                        println!("No decks found");
                    }
                    for entry in &entries {
                        println!("{:<30} {}", entry.file_name, deck_summary(&entry.deck));
                    }
                    Ok(())
                }
            }
        }
        LibraryCommands::Show { name, dir } => {
            let deck = load(&dir, &name).await?;
            match output_format {
                OutputFormat::Json => output_json(&deck),
                OutputFormat::Text => {
                    println!("{}", deck_summary(&deck));
                    println!("id: {}", deck.id);
                    for (i, concept) in deck.concepts.iter().enumerate() {
                        println!("{:>3}. {} - {}", i + 1, concept.term, concept.definition);
                        for variation in &concept.variations {
                            println!("       [{}] {}", variation.kind, variation.text);
                        }
                    }
                    Ok(())
                }
            }
        }
        LibraryCommands::Flashcards { name, dir } => {
            let deck = load(&dir, &name).await?;
            let cards = generate_flashcards(&deck);
            match output_format {
                OutputFormat::Json => output_json(&cards),
                OutputFormat::Text => {
                    for card in &cards {
                        println!("{}  →  {}", card.data.front, card.data.back);
                    }
                    Ok(())
                }
            }
        }
    }
}

async fn load(dir: &Path, name: &str) -> anyhow::Result<Deck> {
    DeckStore::new(dir)
        .load(name)
        .await?
        .ok_or_else(|| anyhow::anyhow!("deck '{}' not found in {}", name, dir.display()))
}
