use std::sync::Arc;
use subtle::ConstantTimeEq;

/// Header carrying the shared write secret
pub const API_KEY_HEADER: &str = "x-api-key";

/// Fixed message returned for every credential failure
pub const CREDENTIALS_ERROR: &str = "Could not validate credentials";

/// Proof that a request presented the configured secret
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Authorized;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Could not validate credentials")]
pub struct AuthenticationError;

/// Single shared-secret gate for write operations
#[derive(Clone)]
pub struct ApiKeyGate {
    secret: Arc<str>,
}

impl ApiKeyGate {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self { secret: secret.into() }
    }

    /// Compare the presented key against the secret in constant time.
    /// A missing key is rejected like a wrong one.
    pub fn verify(&self, presented: Option<&str>) -> Result<Authorized, AuthenticationError> {
        let presented = presented.ok_or(AuthenticationError)?;

        if bool::from(presented.as_bytes().ct_eq(self.secret.as_bytes())) {
            Ok(Authorized)
        } else {
            Err(AuthenticationError)
        }
    }
}

impl std::fmt::Debug for ApiKeyGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyGate").field("secret", &"<redacted>").finish()
    }
}
