use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::app::AppState;
use crate::auth::API_KEY_HEADER;
use crate::error::ApiError;

/// Shared-secret middleware for write routes.
///
/// Runs before any body extractor, so an unauthenticated request is rejected
/// with 403 even when its body would not validate.
pub async fn require_api_key(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let presented = extract_api_key(request.headers());

    let authorized = state.gate.verify(presented).map_err(|e| {
        tracing::warn!(
            "Rejected {} {}: {} header {}",
            request.method(),
            request.uri().path(),
            API_KEY_HEADER,
            if presented.is_some() { "mismatch" } else { "missing" }
        );
        ApiError::from(e)
    })?;

    request.extensions_mut().insert(authorized);
    Ok(next.run(request).await)
}

/// Header value as text; a value that is not visible ASCII counts as missing
fn extract_api_key(headers: &HeaderMap) -> Option<&str> {
    headers.get(API_KEY_HEADER).and_then(|value| value.to_str().ok())
}
