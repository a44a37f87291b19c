// handlers/protected/mod.rs - Protected handlers (X-API-Key required)
//
// Security Level: shared secret, checked by middleware::require_api_key
// Route Prefix: /api/decks (POST)

pub mod decks;

pub use decks::{create as create_deck, DeckWriteResponse};
