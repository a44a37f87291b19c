use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::{json, Value};

use crate::app::AppState;

pub const WELCOME_MESSAGE: &str = "Welcome to the Learning App API";

/// GET / - Fixed welcome payload
pub async fn root() -> Json<Value> {
    Json(json!({ "message": WELCOME_MESSAGE }))
}

/// GET /health - Liveness plus a check that the decks path is usable
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();
    let decks_dir = state.store.dir().display().to_string();

    match state.store.check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "decks_dir": decks_dir,
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check degraded: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "decks_dir": decks_dir,
                    "error": e.to_string(),
                })),
            )
        }
    }
}
