//! Request authentication strategies.
//!
//! An [`Authenticator`] attaches one credential to every outgoing request.
//! The server recognises three headers:
//!
//! - `X-API-Key: <key>` for regular access ([`ApiKeyAuth`])
//! - `X-Admin-Key: <key>` for administrative operations ([`AdminKeyAuth`])
//! - `Authorization: Bearer <token>` ([`BearerTokenAuth`])
//!
//! The client never enforces permissions itself, it only transmits the credential.

use std::fmt;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, InvalidHeaderValue, AUTHORIZATION};

/// Header carrying a regular API key.
pub const API_KEY_HEADER: &str = "x-api-key";
/// Header carrying an admin key.
pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

/// Strategy that signs outgoing requests.
pub trait Authenticator: Send + Sync + fmt::Debug {
    /// Add the credential to the request headers.
    ///
    /// Fails when the credential contains bytes that are not valid in a header value.
    fn apply(&self, headers: &mut HeaderMap) -> Result<(), InvalidHeaderValue>;
}

/// Builds a header value that is hidden from `Debug` output by the HTTP stack.
fn sensitive(value: &str) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut value = HeaderValue::from_str(value)?;
    value.set_sensitive(true);
    Ok(value)
}

/// Sends requests without credentials.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAuth;

impl Authenticator for NoAuth {
    fn apply(&self, _headers: &mut HeaderMap) -> Result<(), InvalidHeaderValue> {
        Ok(())
    }
}

/// Authenticates with the `X-API-Key` header.
#[derive(Clone)]
pub struct ApiKeyAuth {
    key: String,
}

impl ApiKeyAuth {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl fmt::Debug for ApiKeyAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyAuth").field("key", &"[REDACTED]").finish()
    }
}

impl Authenticator for ApiKeyAuth {
    fn apply(&self, headers: &mut HeaderMap) -> Result<(), InvalidHeaderValue> {
        headers.insert(HeaderName::from_static(API_KEY_HEADER), sensitive(&self.key)?);
        Ok(())
    }
}

/// Authenticates with the `X-Admin-Key` header.
///
/// Required by the model, adapter and template management endpoints.
#[derive(Clone)]
pub struct AdminKeyAuth {
    key: String,
}

impl AdminKeyAuth {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl fmt::Debug for AdminKeyAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminKeyAuth").field("key", &"[REDACTED]").finish()
    }
}

impl Authenticator for AdminKeyAuth {
    fn apply(&self, headers: &mut HeaderMap) -> Result<(), InvalidHeaderValue> {
        headers.insert(HeaderName::from_static(ADMIN_KEY_HEADER), sensitive(&self.key)?);
        Ok(())
    }
}

/// Authenticates with `Authorization: Bearer <token>`.
#[derive(Clone)]
pub struct BearerTokenAuth {
    token: String,
}

impl BearerTokenAuth {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl fmt::Debug for BearerTokenAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerTokenAuth")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl Authenticator for BearerTokenAuth {
    fn apply(&self, headers: &mut HeaderMap) -> Result<(), InvalidHeaderValue> {
        headers.insert(AUTHORIZATION, sensitive(&format!("Bearer {}", self.token))?);
        Ok(())
    }
}
