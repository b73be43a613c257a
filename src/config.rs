//! Client configuration.
//!
//! [`ClientBuilder`] collects independently-defaulted settings and produces a
//! [`Client`]. The order of `with_*` calls does not matter, except that the
//! last credential set wins.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::auth::{AdminKeyAuth, ApiKeyAuth, Authenticator, BearerTokenAuth, NoAuth};
use crate::client::Client;
use crate::error::{RequestError, TabbyResult};
use crate::rest::RestClient;
use crate::retry::RetryPolicy;

/// Server address used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
/// Per-request deadline used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable holding the server address.
pub const ENV_ENDPOINT: &str = "TABBY_API_ENDPOINT";
/// Environment variable holding a regular API key.
pub const ENV_API_KEY: &str = "TABBY_API_KEY";
/// Environment variable holding an admin key.
pub const ENV_ADMIN_KEY: &str = "TABBY_ADMIN_KEY";

/// Builder for [`Client`].
///
/// # Example
///
/// ```ignore
/// use std::time::Duration;
/// use tabby_client::{default_retry_policy, ClientBuilder};
///
/// let client = ClientBuilder::new()
///     .with_base_url("http://gpu-box:5000")
///     .with_api_key("secret")
///     .with_timeout(Duration::from_secs(60))
///     .with_retry_policy(default_retry_policy())
///     .build()?;
/// ```
pub struct ClientBuilder {
    base_url: String,
    timeout: Duration,
    http_client: Option<reqwest::Client>,
    auth: Arc<dyn Authenticator>,
    retry_policy: Option<Arc<dyn RetryPolicy>>,
    cancel: Option<CancellationToken>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            http_client: None,
            auth: Arc::new(NoAuth),
            retry_policy: None,
            cancel: None,
        }
    }
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a builder from `TABBY_API_ENDPOINT`, `TABBY_API_KEY` and
    /// `TABBY_ADMIN_KEY`. The admin key takes precedence over the API key.
    /// Unset or empty variables keep the defaults.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());

        let mut builder = Self::new();
        if let Some(endpoint) = var(ENV_ENDPOINT) {
            builder = builder.with_base_url(endpoint);
        }
        if let Some(key) = var(ENV_API_KEY) {
            builder = builder.with_api_key(key);
        }
        if let Some(key) = var(ENV_ADMIN_KEY) {
            builder = builder.with_admin_key(key);
        }
        builder
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Deadline for each call (header receipt only, for streams).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use a preconfigured `reqwest::Client` instead of building one.
    pub fn with_http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = Some(http_client);
        self
    }

    pub fn with_api_key(self, key: impl Into<String>) -> Self {
        self.with_authenticator(ApiKeyAuth::new(key))
    }

    pub fn with_admin_key(self, key: impl Into<String>) -> Self {
        self.with_authenticator(AdminKeyAuth::new(key))
    }

    pub fn with_bearer_token(self, token: impl Into<String>) -> Self {
        self.with_authenticator(BearerTokenAuth::new(token))
    }

    /// Install a custom authenticator, replacing any credential set before.
    pub fn with_authenticator(mut self, auth: impl Authenticator + 'static) -> Self {
        self.auth = Arc::new(auth);
        self
    }

    /// Retry non-streaming calls under `policy`. Without one, calls are attempted once.
    pub fn with_retry_policy(mut self, policy: impl RetryPolicy + 'static) -> Self {
        self.retry_policy = Some(Arc::new(policy));
        self
    }

    /// Parent token for every stream the client opens.
    pub fn with_cancellation_token(mut self, cancel: CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn build(self) -> TabbyResult<Client> {
        let http = match self.http_client {
            Some(http) => http,
            None => reqwest::Client::builder()
                .connect_timeout(self.timeout)
                .build()
                .map_err(|e| RequestError::with_source("failed to build HTTP client", e))?,
        };

        tracing::debug!(
            "building TabbyAPI client for {} (timeout {:?}, auth {:?})",
            self.base_url,
            self.timeout,
            self.auth
        );

        let rest = RestClient::new(self.base_url)
            .with_http_client(http)
            .with_auth(self.auth)
            .with_timeout(self.timeout);

        Ok(Client::from_parts(
            rest,
            self.retry_policy,
            self.cancel.unwrap_or_default(),
        ))
    }
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("auth", &self.auth)
            .field("retry_policy", &self.retry_policy.is_some())
            .finish_non_exhaustive()
    }
}
