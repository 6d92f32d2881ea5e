//! Login, registration and logout.

use leadscout_core::{AuthGrant, Email};
use secrecy::{ExposeSecret, SecretString};
use tracing::{info, instrument, warn};

use super::Route;
use crate::api::ApiClient;
use crate::error::ControllerError;
use crate::session::Session;

pub const MSG_FIELDS_REQUIRED: &str = "Lütfen tüm alanları doldurun";
pub const MSG_PASSWORD_TOO_SHORT: &str = "Şifre en az 6 karakter olmalı";
pub const MSG_INVALID_EMAIL: &str = "Geçerli bir e-posta adresi girin";
pub const MSG_NO_TOKEN: &str = "Token alınamadı, lütfen tekrar deneyin";
pub const MSG_NOT_SAVED: &str = "Veri kaydedilemedi, lütfen tekrar deneyin";
pub const MSG_LOGIN_FAILED: &str = "Giriş başarısız";
pub const MSG_REGISTER_FAILED: &str = "Kayıt başarısız";

/// Minimum password length accepted by the register form.
pub const MIN_PASSWORD_CHARS: usize = 6;

/// Login form input.
pub struct LoginForm {
    /// Username or email.
    pub username: String,
    pub password: SecretString,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl LoginForm {
    /// Both fields are required.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::Validation` when a field is blank.
    pub fn validate(&self) -> Result<(), ControllerError> {
        if self.username.trim().is_empty() || self.password.expose_secret().is_empty() {
            return Err(ControllerError::Validation(MSG_FIELDS_REQUIRED.to_string()));
        }
        Ok(())
    }
}

/// Registration form input.
pub struct RegisterForm {
    pub email: String,
    pub username: String,
    pub password: SecretString,
}

impl std::fmt::Debug for RegisterForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterForm")
            .field("email", &self.email)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl RegisterForm {
    /// All fields are required, the password needs at least
    /// [`MIN_PASSWORD_CHARS`] characters and the email must be well-formed.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::Validation` with the first failing rule.
    pub fn validate(&self) -> Result<Email, ControllerError> {
        let password = self.password.expose_secret();
        if self.email.trim().is_empty() || self.username.trim().is_empty() || password.is_empty()
        {
            return Err(ControllerError::Validation(MSG_FIELDS_REQUIRED.to_string()));
        }
        if password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(ControllerError::Validation(
                MSG_PASSWORD_TOO_SHORT.to_string(),
            ));
        }
        Email::parse(&self.email)
            .map_err(|_| ControllerError::Validation(MSG_INVALID_EMAIL.to_string()))
    }
}

/// The sign-in page.
#[derive(Debug, Clone)]
pub struct AuthPage {
    api: ApiClient,
}

impl AuthPage {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Sign in and store the session.
    ///
    /// On success the caller should navigate to [`Route::Dashboard`].
    ///
    /// # Errors
    ///
    /// Validation errors, or `Action` with the backend's message (falling
    /// back to "Giriş başarısız").
    #[instrument(skip(self, form), fields(username = %form.username))]
    pub async fn login(&self, form: &LoginForm) -> Result<Session, ControllerError> {
        form.validate()?;
        let grant = self
            .api
            .login(form.username.trim(), &form.password)
            .await
            .map_err(|e| ControllerError::api_or(e, MSG_LOGIN_FAILED))?;
        self.establish(grant)
    }

    /// Create an account, sign in and store the session.
    ///
    /// # Errors
    ///
    /// Validation errors, or `Action` with the backend's message (falling
    /// back to "Kayıt başarısız").
    #[instrument(skip(self, form), fields(username = %form.username))]
    pub async fn register(&self, form: &RegisterForm) -> Result<Session, ControllerError> {
        let email = form.validate()?;
        let grant = self
            .api
            .register(email.as_str(), form.username.trim(), &form.password)
            .await
            .map_err(|e| ControllerError::api_or(e, MSG_REGISTER_FAILED))?;
        self.establish(grant)
    }

    /// Clear the session; the caller navigates to the returned route.
    ///
    /// # Errors
    ///
    /// Returns `Session` if the store cannot be written.
    pub fn logout(&self) -> Result<Route, ControllerError> {
        self.api.session().clear()?;
        info!("Signed out");
        Ok(Route::Login)
    }

    fn establish(&self, grant: AuthGrant) -> Result<Session, ControllerError> {
        if grant.access_token.is_empty() {
            warn!("Auth response carried no access token");
            return Err(ControllerError::Action(MSG_NO_TOKEN.to_string()));
        }

        let store = self.api.session();
        store.save(&Session::new(grant.access_token, grant.user))?;

        let Some(session) = store.load()? else {
            warn!("Session could not be read back after saving");
            return Err(ControllerError::Action(MSG_NOT_SAVED.to_string()));
        };
        info!(user_id = %session.user.id, "Signed in");
        Ok(session)
    }
}
