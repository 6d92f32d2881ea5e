//! Authenticated HTTP client for the LeadScout backend.
//!
//! Every request goes through [`ApiClient::call`] (or [`ApiClient::download`]
//! for binary bodies), which:
//!
//! - resolves the path against the configured origin
//! - attaches `Authorization: Bearer <token>` when a token is stored
//! - defaults `Content-Type` to `application/json` for request bodies
//! - clears the session on a 401 to an authenticated call
//! - turns other non-2xx responses into [`ApiError::Status`] carrying the
//!   backend's message
//!
//! Endpoint wrappers live in the submodules as further `impl ApiClient`
//! blocks.

mod admin;
mod auth;
mod companies;
mod dashboard;
mod export;
mod search;
mod settings;

pub use export::ExcelExport;

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::session::SessionStore;

const JSON_CONTENT_TYPE: &str = "application/json";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

// ─────────────────────────────────────────────────────────────────────────────
// Request / Response
// ─────────────────────────────────────────────────────────────────────────────

/// Request payload.
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// Serialized as JSON.
    Json(Value),
    /// Sent verbatim; pair with an explicit `Content-Type` header.
    Raw(Vec<u8>),
}

/// Options for [`ApiClient::call`].
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<RequestBody>,
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
    /// Attach the stored token and treat 401 as an expired session.
    pub authenticated: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::new(Method::GET)
    }
}

impl RequestOptions {
    /// Authenticated request without a body.
    #[must_use]
    pub fn new(method: Method) -> Self {
        Self {
            method,
            body: None,
            headers: HeaderMap::new(),
            query: Vec::new(),
            authenticated: true,
        }
    }

    #[must_use]
    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    #[must_use]
    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    #[must_use]
    pub fn patch() -> Self {
        Self::new(Method::PATCH)
    }

    #[must_use]
    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    /// Set a JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Decode` if `body` cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ApiError> {
        self.body = Some(RequestBody::Json(serde_json::to_value(body)?));
        Ok(self)
    }

    /// Set a URL-encoded form body with its content type.
    #[must_use]
    pub fn form<'a>(mut self, fields: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let encoded = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();
        self.body = Some(RequestBody::Raw(encoded.into_bytes()));
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
        self
    }

    /// Append query parameters.
    #[must_use]
    pub fn query<K: Into<String>, V: Into<String>>(
        mut self,
        pairs: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        self.query
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Add a request header.
    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Send without a token; a 401 is reported like any other status.
    #[must_use]
    pub const fn anonymous(mut self) -> Self {
        self.authenticated = false;
        self
    }
}

/// Decoded 2xx response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiResponse {
    Json(Value),
    Text(String),
    Empty,
}

impl ApiResponse {
    /// Decode a JSON body into `T`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotJson` for text or empty bodies and
    /// `ApiError::Decode` if the JSON does not match `T`.
    pub fn decode<T: DeserializeOwned>(self, path: &str) -> Result<T, ApiError> {
        match self {
            Self::Json(value) => Ok(serde_json::from_value(value)?),
            Self::Text(_) | Self::Empty => Err(ApiError::NotJson(path.to_string())),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Client
// ─────────────────────────────────────────────────────────────────────────────

/// Client for the LeadScout backend API.
///
/// Cheap to clone; clones share the HTTP connection pool and session store.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    base_url: Url,
    session: SessionStore,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client from configuration, storing the session in the
    /// configured file.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Network` if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        Self::with_session(
            config.api_base.clone(),
            SessionStore::file(&config.session_file),
            config.request_timeout,
        )
    }

    /// Create a client over an explicit session store.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Network` if the HTTP client cannot be built.
    pub fn with_session(
        base_url: Url,
        session: SessionStore,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("leadscout/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                http,
                base_url,
                session,
            }),
        })
    }

    /// The session store requests authenticate from.
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    /// Backend origin.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Issue a request and decode the 2xx body.
    ///
    /// JSON content types are parsed; anything else is returned as text. An
    /// empty body yields [`ApiResponse::Empty`].
    ///
    /// # Errors
    ///
    /// - `ApiError::Network` on transport failure
    /// - `ApiError::Unauthenticated` on 401 to an authenticated call
    /// - `ApiError::Status` on any other non-2xx status
    #[instrument(skip(self, options), fields(method = %options.method))]
    pub async fn call(&self, path: &str, options: RequestOptions) -> Result<ApiResponse, ApiError> {
        let response = self.send(path, options).await?;

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("json"));
        let text = response.text().await?;

        if text.trim().is_empty() {
            return Ok(ApiResponse::Empty);
        }
        if is_json {
            return Ok(ApiResponse::Json(serde_json::from_str(&text)?));
        }
        Ok(ApiResponse::Text(text))
    }

    /// Issue a request and return the raw 2xx body.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::call`].
    #[instrument(skip(self, options), fields(method = %options.method))]
    pub async fn download(&self, path: &str, options: RequestOptions) -> Result<Vec<u8>, ApiError> {
        let response = self.send(path, options).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Authenticated GET decoded into `T`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`]; also `ApiError::Decode`/`ApiError::NotJson`
    /// when the body is not the expected JSON.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<T, ApiError> {
        self.call(path, RequestOptions::get().query(query))
            .await?
            .decode(path)
    }

    /// Authenticated request with a JSON body, decoded into `T`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get_json`].
    pub async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.call(path, RequestOptions::new(method).json(body)?)
            .await?
            .decode(path)
    }

    async fn send(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<reqwest::Response, ApiError> {
        let url = self.url(path, &options.query)?;

        let token = if options.authenticated {
            self.inner.session.token()?
        } else {
            None
        };

        let mut headers = options.headers;
        let body = match options.body {
            Some(RequestBody::Json(value)) => Some(serde_json::to_vec(&value)?),
            Some(RequestBody::Raw(bytes)) => Some(bytes),
            None => None,
        };
        if body.is_some() && !headers.contains_key(CONTENT_TYPE) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        }

        let mut request = self
            .inner
            .http
            .request(options.method, url)
            .headers(headers);
        if let Some(token) = &token {
            request = request.bearer_auth(token.expose_secret());
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        debug!(%status, path, "API response");

        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED && options.authenticated {
            warn!(path, "Backend rejected the session token; clearing session");
            self.inner.session.clear()?;
            return Err(ApiError::Unauthenticated);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            detail: extract_error_message(&body),
        })
    }

    fn url(&self, path: &str, query: &[(String, String)]) -> Result<Url, ApiError> {
        let mut url = self
            .inner
            .base_url
            .join(path)
            .map_err(|e| ApiError::InvalidPath(path.to_string(), e))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }
}

/// Pull a human-readable message out of an error body.
///
/// Checks, in order: a `detail` string, FastAPI validation errors
/// (`detail[].msg` joined with `"; "`), a `message` string, a bare JSON
/// string, and finally a non-JSON text body.
#[must_use]
pub fn extract_error_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return Some(body.to_string());
    };

    match value.get("detail") {
        Some(Value::String(detail)) if !detail.trim().is_empty() => {
            return Some(detail.clone());
        }
        Some(Value::Array(items)) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.as_str()),
                    other => other.get("msg").and_then(Value::as_str),
                })
                .filter(|m| !m.trim().is_empty())
                .collect();
            if !messages.is_empty() {
                return Some(messages.join("; "));
            }
        }
        _ => {}
    }

    if let Some(message) = value.get("message").and_then(Value::as_str)
        && !message.trim().is_empty()
    {
        return Some(message.to_string());
    }

    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        _ => None,
    }
}
