use thiserror::Error;

/// Filesystem failures while reading or writing decks
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid deck filename: {0}")]
    InvalidFileName(String),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize deck: {0}")]
    Serialize(serde_json::Error),

    #[error("Stored deck {file} is not a valid deck: {source}")]
    Corrupt {
        file: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type StorageResult<T> = Result<T, StorageError>;
