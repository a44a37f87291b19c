use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderName, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::{ApiKeyGate, API_KEY_HEADER};
use crate::config::{AppConfig, ConfigError};
use crate::handlers::{protected, public};
use crate::middleware::require_api_key;
use crate::storage::DeckStore;

/// Per-request context. Immutable after startup; cloned into every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub gate: ApiKeyGate,
    pub store: DeckStore,
}

impl AppState {
    pub fn new(gate: ApiKeyGate, store: DeckStore) -> Self {
        Self { gate, store }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(
            ApiKeyGate::new(config.api_key()?),
            DeckStore::new(config.storage.decks_dir.clone()),
        ))
    }
}

/// Full application router with the configured global middleware
pub fn app(config: &AppConfig) -> Result<Router, ConfigError> {
    let state = AppState::from_config(config)?;

    let mut router = routes(state).layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));

    if config.security.enable_cors {
        router = router.layer(cors_layer(&config.security.cors_origins));
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    Ok(router)
}

/// Routes without global middleware
pub fn routes(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        // Write routes go first so unmatched methods fall back to the public 405
        .merge(deck_write_routes(state.clone()))
        .merge(deck_read_routes())
        .with_state(state)
}

fn deck_write_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/decks", post(protected::create_deck))
        .route_layer(middleware::from_fn_with_state(state, require_api_key))
}

fn deck_read_routes() -> Router<AppState> {
    Router::new()
        .route("/api/decks", get(public::list_decks))
        .route("/api/decks/:name", get(public::show_deck))
        .route("/api/decks/:name/flashcards", get(public::deck_flashcards))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(API_KEY_HEADER)])
}
