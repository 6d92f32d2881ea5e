//! Authentication endpoints.

use leadscout_core::{AuthGrant, User};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::instrument;

use super::{ApiClient, RequestOptions};
use crate::error::ApiError;

#[derive(Serialize)]
struct RegisterBody<'a> {
    email: &'a str,
    username: &'a str,
    password: &'a str,
}

impl ApiClient {
    /// Exchange credentials for a token (`POST /api/auth/login`).
    ///
    /// Sent as an OAuth2 password form without any stored token.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` with the backend's message when the
    /// credentials are rejected.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<AuthGrant, ApiError> {
        let path = "/api/auth/login";
        let options = RequestOptions::post()
            .form([("username", username), ("password", password.expose_secret())])
            .anonymous();
        self.call(path, options).await?.decode(path)
    }

    /// Create an account (`POST /api/auth/register`).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` when the email or username is taken or the
    /// input is rejected.
    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        email: &str,
        username: &str,
        password: &SecretString,
    ) -> Result<AuthGrant, ApiError> {
        let path = "/api/auth/register";
        let body = RegisterBody {
            email,
            username,
            password: password.expose_secret(),
        };
        let options = RequestOptions::post().json(&body)?.anonymous();
        self.call(path, options).await?.decode(path)
    }

    /// Profile of the token's owner (`GET /api/auth/me`).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthenticated` if the token is missing or expired.
    #[instrument(skip(self))]
    pub async fn me(&self) -> Result<User, ApiError> {
        self.get_json("/api/auth/me", Vec::new()).await
    }
}
