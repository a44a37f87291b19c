pub mod error;
pub mod store;

pub use error::{StorageError, StorageResult};
pub use store::{deck_filename, DeckEntry, DeckStore, SaveOutcome};
