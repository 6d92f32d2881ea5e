//! Error types for the API client and page controllers.

use thiserror::Error;

use crate::pages::Route;
use crate::session::SessionError;

/// Message shown when the backend gives no usable error text.
pub const FALLBACK_MESSAGE: &str = "Bir hata oluştu";

/// Message shown when a non-admin opens the admin console.
pub const FORBIDDEN_MESSAGE: &str = "Bu sayfaya erişim yetkiniz yok";

/// Message shown when a page needs a session and none exists.
pub const LOGIN_REQUIRED_MESSAGE: &str = "Lütfen giriş yapın";

/// Errors from [`crate::ApiClient`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure (connection refused, timeout, TLS, ...).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered 401 to an authenticated call. The session has
    /// already been cleared when this is returned.
    #[error("Session expired or invalid")]
    Unauthenticated,

    /// Non-2xx response.
    #[error("HTTP {status}: {}", .detail.as_deref().unwrap_or(FALLBACK_MESSAGE))]
    Status {
        status: u16,
        /// Message extracted from the response body, if any.
        detail: Option<String>,
    },

    /// A 2xx response whose body reports a failure.
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// A 2xx JSON body did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A 2xx response had no JSON body where one was required.
    #[error("Expected a JSON response from {0}")]
    NotJson(String),

    /// The request path could not be joined onto the API base.
    #[error("Invalid request path {0}: {1}")]
    InvalidPath(String, url::ParseError),

    /// The session store failed while attaching or clearing credentials.
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl ApiError {
    /// User-facing message, falling back to [`FALLBACK_MESSAGE`].
    #[must_use]
    pub fn message(&self) -> String {
        self.message_or(FALLBACK_MESSAGE)
    }

    /// User-facing message, falling back to `fallback` when the backend sent
    /// nothing usable.
    #[must_use]
    pub fn message_or(&self, fallback: &str) -> String {
        match self {
            Self::Status { detail, .. } => detail.clone().unwrap_or_else(|| fallback.to_string()),
            Self::Rejected(message) => message.clone(),
            Self::Unauthenticated => LOGIN_REQUIRED_MESSAGE.to_string(),
            Self::Network(_)
            | Self::Decode(_)
            | Self::NotJson(_)
            | Self::InvalidPath(..)
            | Self::Session(_) => fallback.to_string(),
        }
    }

    /// HTTP status of a non-2xx response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Unauthenticated => Some(401),
            _ => None,
        }
    }
}

/// Errors from a page controller action.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// Form input rejected before any network call.
    #[error("{0}")]
    Validation(String),

    /// No session, or the backend rejected the token.
    #[error("Login required")]
    LoginRequired,

    /// Signed in, but not allowed on this page.
    #[error("Bu sayfaya erişim yetkiniz yok")]
    Forbidden,

    /// The action failed; the message is already user-facing.
    #[error("{0}")]
    Action(String),

    #[error(transparent)]
    Api(ApiError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ApiError> for ControllerError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Unauthenticated => Self::LoginRequired,
            ApiError::Session(e) => Self::Session(e),
            other => Self::Api(other),
        }
    }
}

impl ControllerError {
    /// Wrap an API failure with a page-specific fallback message.
    ///
    /// A 401 still becomes [`ControllerError::LoginRequired`].
    #[must_use]
    pub fn api_or(err: ApiError, fallback: &str) -> Self {
        match err {
            ApiError::Unauthenticated | ApiError::Session(_) => err.into(),
            other => Self::Action(other.message_or(fallback)),
        }
    }

    /// Where a browser would navigate after this error, if anywhere.
    #[must_use]
    pub const fn redirect(&self) -> Option<Route> {
        match self {
            Self::LoginRequired => Some(Route::Login),
            Self::Forbidden => Some(Route::Dashboard),
            _ => None,
        }
    }

    /// Text to show the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(message) | Self::Action(message) => message.clone(),
            Self::LoginRequired => LOGIN_REQUIRED_MESSAGE.to_string(),
            Self::Forbidden => FORBIDDEN_MESSAGE.to_string(),
            Self::Api(e) => e.message(),
            Self::Session(e) => e.to_string(),
            Self::Io(e) => e.to_string(),
        }
    }
}
