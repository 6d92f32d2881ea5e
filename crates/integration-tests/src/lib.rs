//! Integration tests for LeadScout.
//!
//! The page controllers are driven end to end against [`MockBackend`], an
//! axum server on a random local port that answers with canned replies and
//! records every request it sees.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p leadscout-integration-tests
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! let backend = MockBackend::start().await?;
//! backend.reply_json(Method::GET, "/api/dashboard/stats", StatusCode::OK, stats);
//! let api = backend.client(signed_in(user(1, "elif", false))?)?;
//! let view = DashboardPage::new(api).load().await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderName, Uri};
use axum::response::{IntoResponse, Response};
use leadscout_client::{ApiClient, ApiError, Session, SessionError, SessionStore};
use leadscout_core::{Theme, User, UserId};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use url::Url;

pub use axum::http::{Method, StatusCode};

/// Token stored by [`signed_in`].
pub const TEST_TOKEN: &str = "test-token";

/// A request as the backend received it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    /// Body as UTF-8 text.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Body parsed as JSON; `Value::Null` when it is not JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }

    /// Decoded query pairs.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.query
            .as_deref()
            .map(|q| {
                url::form_urlencoded::parse(q.as_bytes())
                    .into_owned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
struct Reply {
    status: StatusCode,
    content_type: Option<&'static str>,
    body: Vec<u8>,
}

#[derive(Debug, Default)]
struct MockState {
    replies: Mutex<HashMap<(Method, String), Reply>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header = |name: HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToOwned::to_owned)
    };
    let path = uri.path().to_owned();

    lock(&state.requests).push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        query: uri.query().map(ToOwned::to_owned),
        authorization: header(AUTHORIZATION),
        content_type: header(CONTENT_TYPE),
        body: body.to_vec(),
    });

    let reply = lock(&state.replies).get(&(method, path)).cloned();
    match reply {
        Some(Reply {
            status,
            content_type: Some(content_type),
            body,
        }) => (status, [(CONTENT_TYPE, content_type)], body).into_response(),
        Some(Reply {
            status,
            content_type: None,
            body,
        }) => (status, body).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            [(CONTENT_TYPE, "application/json")],
            json!({"detail": "Not Found"}).to_string(),
        )
            .into_response(),
    }
}

/// A scripted backend on `127.0.0.1`. Unscripted routes answer 404.
#[derive(Debug)]
pub struct MockBackend {
    base_url: Url,
    state: Arc<MockState>,
    task: JoinHandle<()>,
}

impl MockBackend {
    /// Bind a random port and start serving.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the listener cannot be bound.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let base_url =
            Url::parse(&format!("http://{addr}/")).map_err(std::io::Error::other)?;

        let state = Arc::new(MockState::default());
        let app = Router::new()
            .fallback(handle)
            .with_state(Arc::clone(&state));
        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            base_url,
            state,
            task,
        })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// An API client for this backend using `session`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the HTTP client cannot be built.
    pub fn client(&self, session: SessionStore) -> Result<ApiClient, ApiError> {
        ApiClient::with_session(self.base_url.clone(), session, Duration::from_secs(5))
    }

    /// Answer `method path` with a JSON body.
    pub fn reply_json(&self, method: Method, path: &str, status: StatusCode, body: Value) {
        self.reply(
            method,
            path,
            Reply {
                status,
                content_type: Some("application/json"),
                body: body.to_string().into_bytes(),
            },
        );
    }

    /// Answer `method path` with raw bytes.
    pub fn reply_bytes(
        &self,
        method: Method,
        path: &str,
        status: StatusCode,
        content_type: Option<&'static str>,
        body: Vec<u8>,
    ) {
        self.reply(
            method,
            path,
            Reply {
                status,
                content_type,
                body,
            },
        );
    }

    fn reply(&self, method: Method, path: &str, reply: Reply) {
        lock(&self.state.replies).insert((method, path.to_owned()), reply);
    }

    /// Every request received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.state.requests).clone()
    }

    /// Requests received for `path`.
    #[must_use]
    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        lock(&self.state.requests)
            .iter()
            .filter(|r| r.path == path)
            .cloned()
            .collect()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.task.abort();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Fixtures
// ─────────────────────────────────────────────────────────────────────────────

#[must_use]
pub fn user(id: i64, username: &str, is_admin: bool) -> User {
    User {
        id: UserId::new(id),
        username: username.to_owned(),
        email: format!("{username}@example.com"),
        balance: 40,
        is_admin,
        theme: Theme::Dark,
    }
}

/// `user` in the backend's wire format.
#[must_use]
pub fn user_json(user: &User) -> Value {
    json!({
        "id": user.id.as_i64(),
        "username": user.username,
        "email": user.email,
        "balance": user.balance,
        "is_admin": user.is_admin,
        "theme": user.theme.as_str(),
    })
}

/// An in-memory session holding [`TEST_TOKEN`] and `user`.
///
/// # Errors
///
/// Returns `SessionError` if the session cannot be written.
pub fn signed_in(user: User) -> Result<SessionStore, SessionError> {
    let store = SessionStore::in_memory();
    store.save(&Session::new(TEST_TOKEN, user))?;
    Ok(store)
}

/// A company record as `/api/companies/` returns it.
#[must_use]
pub fn company_json(id: i64, firma_adi: &str, sehir: &str, rating: Option<f64>) -> Value {
    json!({
        "id": id,
        "firma_adi": firma_adi,
        "sehir": sehir,
        "ilce": "Merkez",
        "ulke": "Türkiye",
        "adres": format!("{firma_adi} Sk. 1"),
        "telefon": "0212 000 00 00",
        "web": null,
        "asama": "Yeni",
        "kategori": "Kafe",
        "rating": rating,
        "user_ratings_total": 12,
        "created_at": "2024-05-01T10:00:00"
    })
}
