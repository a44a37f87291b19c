use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::app::AppState;
use crate::error::ApiError;
use crate::models::{generate_flashcards, Deck, Flashcard};
use crate::storage::DeckEntry;

const DECK_NOT_FOUND: &str = "Deck not found";

/// GET /api/decks - Every stored deck with its file stem
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<DeckEntry>>, ApiError> {
    let entries = state.store.list().await?;
    Ok(Json(entries))
}

/// GET /api/decks/:name - One stored deck by file stem (e.g. `spanish-basics`)
pub async fn show(
    Path(name): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Deck>, ApiError> {
    let deck = load_or_404(&state, &name).await?;
    Ok(Json(deck))
}

/// GET /api/decks/:name/flashcards - Forward and reverse cards for each concept
pub async fn flashcards(
    Path(name): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<Flashcard>>, ApiError> {
    let deck = load_or_404(&state, &name).await?;
    Ok(Json(generate_flashcards(&deck)))
}

async fn load_or_404(state: &AppState, name: &str) -> Result<Deck, ApiError> {
    state
        .store
        .load(name)
        .await?
        .ok_or_else(|| ApiError::not_found(DECK_NOT_FOUND))
}
