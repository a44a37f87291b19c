use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use super::error::{StorageError, StorageResult};
use crate::models::Deck;

const DECK_EXTENSION: &str = "json";

/// Storage key for a deck: lower-cased title, spaces replaced by hyphens, `.json` appended.
/// No other characters are touched.
pub fn deck_filename(title: &str) -> String {
    format!("{}.{}", title.to_lowercase().replace(' ', "-"), DECK_EXTENSION)
}

/// Result of a save. An existing file is never overwritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Created { filename: String },
    AlreadyExists { filename: String },
}

impl SaveOutcome {
    pub fn filename(&self) -> &str {
        match self {
            SaveOutcome::Created { filename } | SaveOutcome::AlreadyExists { filename } => filename,
        }
    }
}

/// A stored deck paired with its file stem
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckEntry {
    pub file_name: String,
    pub deck: Deck,
}

/// One JSON file per deck inside a single directory
#[derive(Debug, Clone)]
pub struct DeckStore {
    dir: PathBuf,
}

impl DeckStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Resolve a filename inside the decks directory. Anything that is not a
    /// single plain path component (separators, `..`) is refused.
    fn resolve(&self, filename: &str) -> StorageResult<PathBuf> {
        let mut components = Path::new(filename).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.dir.join(filename)),
            _ => Err(StorageError::InvalidFileName(filename.to_string())),
        }
    }

    /// Persist a deck unless a deck with the same derived filename exists.
    ///
    /// The existence check and the final rename are not atomic with respect to
    /// each other: two concurrent saves of the same title can both see the file
    /// as absent, and the later rename wins.
    pub async fn save(&self, deck: &Deck) -> StorageResult<SaveOutcome> {
        let filename = deck_filename(&deck.title);
        let path = self.resolve(&filename)?;

        fs::create_dir_all(&self.dir).await?;

        if fs::try_exists(&path).await? {
            tracing::info!("Deck '{}' already exists, leaving it untouched", filename);
            return Ok(SaveOutcome::AlreadyExists { filename });
        }

        let body = serde_json::to_string_pretty(deck).map_err(StorageError::Serialize)?;

        // Temp name stays short so any legal final filename has a legal temp sibling
        let tmp_path = self.dir.join(format!(".{}.tmp", Uuid::new_v4().simple()));
        if let Err(e) = write_then_rename(&tmp_path, &path, body.as_bytes()).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }

        tracing::info!("Deck '{}' written to {}", deck.title, path.display());
        Ok(SaveOutcome::Created { filename })
    }

    /// Load the deck stored at `<stem>.json`. `None` when there is no such file.
    pub async fn load(&self, stem: &str) -> StorageResult<Option<Deck>> {
        let filename = format!("{}.{}", stem, DECK_EXTENSION);
        let path = match self.resolve(&filename) {
            Ok(path) => path,
            Err(_) => return Ok(None),
        };

        match fs::read_to_string(&path).await {
            Ok(text) => serde_json::from_str(&text)
                .map(Some)
                .map_err(|source| StorageError::Corrupt { file: filename, source }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Every parseable deck in the directory, sorted by file name.
    /// Unparseable files are skipped; a missing directory is an empty listing.
    pub async fn list(&self) -> StorageResult<Vec<DeckEntry>> {
        let mut dir = match fs::read_dir(&self.dir).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut entries = Vec::new();
        while let Some(entry) = dir.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(DECK_EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            match self.load(stem).await {
                Ok(Some(deck)) => entries.push(DeckEntry {
                    file_name: stem.to_string(),
                    deck,
                }),
                Ok(None) => {}
                Err(e) => tracing::warn!("Skipping deck file {}: {}", path.display(), e),
            }
        }

        entries.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        Ok(entries)
    }

    /// Fails when the decks path exists but is not a directory.
    /// A missing directory is fine; it is created on the first save.
    pub async fn check(&self) -> StorageResult<()> {
        match fs::metadata(&self.dir).await {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(StorageError::Io(std::io::Error::other(format!(
                "{} is not a directory",
                self.dir.display()
            )))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

async fn write_then_rename(tmp_path: &Path, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(tmp_path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await?;
    drop(file);
    fs::rename(tmp_path, path).await?;

    // fsync the directory so the rename itself is durable
    if let Some(parent) = path.parent() {
        if let Ok(dir) = fs::File::open(parent).await {
            let _ = dir.sync_all().await;
        }
    }
    Ok(())
}
