// handlers/public/mod.rs - Public handlers (no API key required)
//
// Security Level: None
// Route Prefix: / and /api/decks (GET only)

pub mod decks;
pub mod root;

pub use decks::{flashcards as deck_flashcards, list as list_decks, show as show_deck};
pub use root::{health, root};
