// HTTP API Error Types
use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};

use crate::auth::{AuthenticationError, CREDENTIALS_ERROR};
use crate::schema::{FieldError, LocSegment, ValidationError};
use crate::storage::StorageError;

/// HTTP API error with appropriate status codes and client-facing `detail` bodies
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 403 Forbidden
    Forbidden(String),

    // 404 Not Found
    NotFound(String),

    // 413 Payload Too Large
    PayloadTooLarge(String),

    // 422 Unprocessable Entity (body does not match the deck shape)
    UnprocessableEntity {
        message: String,
        field_errors: Vec<FieldError>,
    },

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::Forbidden(_) => 403,
            ApiError::NotFound(_) => 404,
            ApiError::PayloadTooLarge(_) => 413,
            ApiError::UnprocessableEntity { .. } => 422,
            ApiError::InternalServerError(_) => 500,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Forbidden(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::PayloadTooLarge(msg) => msg,
            ApiError::UnprocessableEntity { message, .. } => message,
            ApiError::InternalServerError(msg) => msg,
        }
    }

    /// Convert to JSON response body.
    /// Validation failures list every field under `detail`, locations rooted at `body`.
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::UnprocessableEntity { field_errors, .. } => {
                let detail: Vec<FieldError> = field_errors
                    .iter()
                    .map(|err| {
                        let mut err = err.clone();
                        err.loc.insert(0, LocSegment::from("body"));
                        err
                    })
                    .collect();
                json!({ "detail": detail })
            }
            _ => json!({ "detail": self.message() }),
        }
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn unprocessable_entity(message: impl Into<String>, field_errors: Vec<FieldError>) -> Self {
        ApiError::UnprocessableEntity {
            message: message.into(),
            field_errors,
        }
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }
}

// Convert domain error types to ApiError
impl From<AuthenticationError> for ApiError {
    fn from(_: AuthenticationError) -> Self {
        ApiError::forbidden(CREDENTIALS_ERROR)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        tracing::debug!("Rejected deck payload: {}", err);
        let message = err.to_string();
        ApiError::unprocessable_entity(message, err.errors)
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        tracing::error!("Deck storage error: {}", err);
        ApiError::internal_server_error(err.to_string())
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(rejection.body_text())
        } else {
            ApiError::bad_request(rejection.body_text())
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldErrorKind;

    #[test]
    fn authentication_error_is_fixed_403() {
        let err: ApiError = AuthenticationError.into();
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.to_json(), json!({"detail": "Could not validate credentials"}));
    }

    #[test]
    fn validation_error_lists_fields_under_body() {
        let err: ApiError = ValidationError::new(vec![FieldError::new(
            vec!["concepts".into(), LocSegment::Index(0), "term".into()],
            FieldErrorKind::Missing,
        )])
        .into();

        assert_eq!(err.status_code(), 422);
        assert_eq!(
            err.to_json(),
            json!({"detail": [{
                "loc": ["body", "concepts", 0, "term"],
                "msg": "Field required",
                "type": "missing"
            }]})
        );
    }

    #[test]
    fn storage_error_keeps_underlying_message() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied");
        let err: ApiError = StorageError::from(io).into();
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.to_json(), json!({"detail": "permission denied"}));
    }
}
