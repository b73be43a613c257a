//! JSON-over-HTTP transport.
//!
//! [`RestClient`] builds requests (method, URL, JSON body, headers), signs them
//! with the configured [`Authenticator`], and turns the response into either a
//! decoded value or an error. Non-2xx responses become [`ApiError`]s.
//! [`RestClient::do_raw`] hands back the still-open response for streaming.
//!
//! The transport never retries; see [`crate::retry`].

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, Response, StatusCode};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;

use crate::auth::{Authenticator, NoAuth};
use crate::error::{ApiError, RequestError, TabbyError, TabbyResult};

/// Default `Content-Type` for request bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Header the server uses to echo its request identifier.
const REQUEST_ID_HEADER: &str = "x-request-id";

/// REST client bound to one server.
#[derive(Debug, Clone)]
pub struct RestClient {
    base_url: String,
    http: reqwest::Client,
    auth: Arc<dyn Authenticator>,
    content_type: String,
    timeout: Option<Duration>,
}

impl RestClient {
    /// Create a client for `base_url` with no credentials and no deadline.
    ///
    /// Trailing slashes on the base URL are dropped.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            auth: Arc::new(NoAuth),
            content_type: JSON_CONTENT_TYPE.to_string(),
            timeout: None,
        }
    }

    /// Use a preconfigured `reqwest::Client` (proxies, TLS, pool settings).
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn with_auth(mut self, auth: Arc<dyn Authenticator>) -> Self {
        self.auth = auth;
        self
    }

    /// Override the `Content-Type` sent with request bodies.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Deadline for a whole call. Streaming calls only use it up to the response headers.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Join `endpoint` onto the base URL and append URL-encoded query parameters.
    pub fn build_url(&self, endpoint: &str, query: &[(&str, &str)]) -> String {
        let mut url = format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'));
        if !query.is_empty() {
            let encoded: Vec<String> = query
                .iter()
                .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
                .collect();
            url.push('?');
            url.push_str(&encoded.join("&"));
        }
        url
    }

    /// GET `endpoint` and decode the JSON response.
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> TabbyResult<T> {
        let url = self.build_url(endpoint, query);
        self.execute::<(), T>(Method::GET, &url, None).await
    }

    /// POST `body` as JSON to `endpoint` and decode the response.
    pub async fn post<B, T>(&self, endpoint: &str, body: &B) -> TabbyResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.build_url(endpoint, &[]);
        self.execute(Method::POST, &url, Some(body)).await
    }

    /// PUT `body` as JSON to `endpoint` and decode the response.
    pub async fn put<B, T>(&self, endpoint: &str, body: &B) -> TabbyResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.build_url(endpoint, &[]);
        self.execute(Method::PUT, &url, Some(body)).await
    }

    /// DELETE `endpoint`, discarding any response body.
    pub async fn delete(&self, endpoint: &str, query: &[(&str, &str)]) -> TabbyResult<()> {
        let url = self.build_url(endpoint, query);
        self.execute::<(), IgnoredAny>(Method::DELETE, &url, None)
            .await
            .map(|_| ())
    }

    /// Send a request to a full URL and decode the response.
    ///
    /// A `204 No Content` or empty body decodes as JSON `null`, so use `()`,
    /// `Option<_>` or [`IgnoredAny`] when no payload is expected.
    pub async fn execute<B, T>(&self, method: Method, url: &str, body: Option<&B>) -> TabbyResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(method.clone(), url, body)?;
        self.with_deadline(async {
            let response = self.send(&method, url, request).await?;
            if !response.status().is_success() {
                return Err(error_from_response(&method, url, response).await);
            }
            decode_body(response).await
        })
        .await
    }

    /// Send a request and return the open response on success.
    ///
    /// The caller owns the body. Non-2xx responses are read, released and
    /// returned as an [`ApiError`].
    pub async fn do_raw<B>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> TabbyResult<Response>
    where
        B: Serialize + ?Sized,
    {
        let request = self.request(method.clone(), url, body)?;
        self.with_deadline(async {
            let response = self.send(&method, url, request).await?;
            if !response.status().is_success() {
                return Err(error_from_response(&method, url, response).await);
            }
            Ok(response)
        })
        .await
    }

    fn request<B>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> TabbyResult<reqwest::RequestBuilder>
    where
        B: Serialize + ?Sized,
    {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE));

        let mut builder = self.http.request(method, url);
        if let Some(body) = body {
            let payload = serde_json::to_vec(body)
                .map_err(|e| RequestError::with_source("failed to marshal request body", e))?;
            let content_type = HeaderValue::from_str(&self.content_type)
                .map_err(|e| RequestError::with_source("invalid content type", e))?;
            headers.insert(CONTENT_TYPE, content_type);
            builder = builder.body(payload);
        }

        self.auth
            .apply(&mut headers)
            .map_err(|e| RequestError::with_source("failed to apply credentials", e))?;

        Ok(builder.headers(headers))
    }

    async fn send(
        &self,
        method: &Method,
        url: &str,
        request: reqwest::RequestBuilder,
    ) -> TabbyResult<Response> {
        tracing::debug!("{} {}", method, url);
        let response = request
            .send()
            .await
            .map_err(|e| RequestError::transport("failed to execute request", e))?;
        tracing::debug!("{} {} -> {}", method, url, response.status());
        Ok(response)
    }

    async fn with_deadline<T, F>(&self, call: F) -> TabbyResult<T>
    where
        F: Future<Output = TabbyResult<T>>,
    {
        match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::warn!("request exceeded deadline of {:?}", limit);
                    Err(RequestError::timeout().into())
                }
            },
            None => call.await,
        }
    }
}

async fn decode_body<T: DeserializeOwned>(response: Response) -> TabbyResult<T> {
    let status = response.status();
    if status == StatusCode::NO_CONTENT {
        return decode_empty(status.as_u16());
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| RequestError::transport("failed to read response body", e))?;
    if body.is_empty() {
        return decode_empty(status.as_u16());
    }

    serde_json::from_slice(&body)
        .map_err(|e| {
            RequestError::decode("failed to decode response body", status.as_u16(), e).into()
        })
}

fn decode_empty<T: DeserializeOwned>(status: u16) -> TabbyResult<T> {
    serde_json::from_str("null")
        .map_err(|e| RequestError::decode("empty response body", status, e).into())
}

/// Turn a non-2xx response into an [`ApiError`].
///
/// Falls back to the raw body when it is not an error object (or carries no
/// message), and to the status reason phrase when the body is empty. The
/// status code always comes from the response itself.
async fn error_from_response(method: &Method, url: &str, response: Response) -> TabbyError {
    let status = response.status();
    let header_request_id = response
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let mut error = match response.bytes().await {
        Err(err) => ApiError::new(
            status.as_u16(),
            format!("failed to read error response body: {}", err),
        ),
        Ok(body) if body.is_empty() => {
            ApiError::new(status.as_u16(), status.canonical_reason().unwrap_or_default())
        }
        Ok(body) => parse_error_body(status, &body),
    };

    if error.request_id.is_none() {
        error.request_id = header_request_id;
    }

    tracing::warn!("{} {} failed with status {}: {}", method, url, status.as_u16(), error.message);
    error.into()
}

/// Only a JSON object counts as a structured error body.
fn parse_error_body(status: StatusCode, body: &[u8]) -> ApiError {
    let raw = || String::from_utf8_lossy(body).into_owned();
    let decoded = match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(value @ serde_json::Value::Object(_)) => serde_json::from_value::<ApiError>(value).ok(),
        _ => None,
    };
    match decoded {
        Some(mut error) => {
            error.status_code = status.as_u16();
            if error.message.is_empty() {
                error.message = raw();
            }
            error
        }
        None => ApiError::new(status.as_u16(), raw()),
    }
}
