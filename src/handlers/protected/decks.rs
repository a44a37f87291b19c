use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    Extension,
    response::Json,
};
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::auth::Authorized;
use crate::error::ApiError;
use crate::schema::parse_deck_bytes;
use crate::storage::SaveOutcome;

pub const DECK_CREATED: &str = "Deck created successfully!";
pub const DECK_EXISTS: &str = "Deck with this title already exists.";

/// Body returned for both a fresh write and a title collision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckWriteResponse {
    pub message: String,
    pub filename: String,
}

impl From<SaveOutcome> for DeckWriteResponse {
    fn from(outcome: SaveOutcome) -> Self {
        let message = match outcome {
            SaveOutcome::Created { .. } => DECK_CREATED,
            SaveOutcome::AlreadyExists { .. } => DECK_EXISTS,
        };
        Self {
            message: message.to_string(),
            filename: outcome.filename().to_string(),
        }
    }
}

/**
 * POST /api/decks - Validate a deck and store it as `<slug>.json`
 *
 * Receives a deck from a trusted source (a GPT action holding the shared key).
 * The key has already been checked by the route layer, which leaves an
 * `Authorized` marker behind; without it the handler is never reached.
 *
 * Expected Input:
 * ```json
 * {
 *   "title": "Spanish Basics",
 *   "description": "optional",
 *   "concepts": [{ "term": "hola", "definition": "hello" }]
 * }
 * ```
 *
 * A title that maps to an existing file is not an error: the stored file is
 * left alone and the response says so.
 */
pub async fn create(
    State(state): State<AppState>,
    Extension(_authorized): Extension<Authorized>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<DeckWriteResponse>, ApiError> {
    let body = body?;
    let deck = parse_deck_bytes(&body)?;

    tracing::debug!("Validated deck '{}' with {} concept(s)", deck.title, deck.concepts.len());

    let outcome = state.store.save(&deck).await?;
    Ok(Json(outcome.into()))
}
