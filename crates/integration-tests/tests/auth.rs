//! Sign-in, registration and session expiry against the mock backend.

#![allow(clippy::unwrap_used)]

use leadscout_client::pages::{AuthPage, LoginForm, RegisterForm, Route, ThemeSwitcher};
use leadscout_client::{ApiError, ControllerError, SessionStore};
use leadscout_core::Theme;
use leadscout_integration_tests::{
    Method, MockBackend, StatusCode, TEST_TOKEN, signed_in, user, user_json,
};
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;

fn login_form(username: &str, password: &str) -> LoginForm {
    LoginForm {
        username: username.to_owned(),
        password: SecretString::from(password.to_owned()),
    }
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn login_sends_form_without_token_and_stores_session() {
    let backend = MockBackend::start().await.unwrap();
    let elif = user(7, "elif", false);
    backend.reply_json(
        Method::POST,
        "/api/auth/login",
        StatusCode::OK,
        json!({"access_token": "jwt-abc", "token_type": "bearer", "user": user_json(&elif)}),
    );

    let store = SessionStore::in_memory();
    let api = backend.client(store.clone()).unwrap();
    let session = AuthPage::new(api)
        .login(&login_form("elif", "secret1"))
        .await
        .unwrap();

    assert_eq!(session.user, elif);
    assert_eq!(store.token().unwrap().unwrap().expose_secret(), "jwt-abc");

    let requests = backend.requests_to("/api/auth/login");
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert!(request.authorization.is_none());
    assert_eq!(
        request.content_type.as_deref(),
        Some("application/x-www-form-urlencoded")
    );
    assert_eq!(request.text(), "username=elif&password=secret1");
}

#[tokio::test]
async fn login_shows_backend_detail() {
    let backend = MockBackend::start().await.unwrap();
    backend.reply_json(
        Method::POST,
        "/api/auth/login",
        StatusCode::UNAUTHORIZED,
        json!({"detail": "Kullanıcı adı veya şifre hatalı"}),
    );

    let store = SessionStore::in_memory();
    let api = backend.client(store.clone()).unwrap();
    let err = AuthPage::new(api)
        .login(&login_form("elif", "wrong-pass"))
        .await
        .unwrap_err();

    assert_eq!(err.user_message(), "Kullanıcı adı veya şifre hatalı");
    assert!(store.load().unwrap().is_none());
}

#[tokio::test]
async fn login_falls_back_when_error_body_is_empty() {
    let backend = MockBackend::start().await.unwrap();
    backend.reply_bytes(
        Method::POST,
        "/api/auth/login",
        StatusCode::INTERNAL_SERVER_ERROR,
        None,
        Vec::new(),
    );

    let api = backend.client(SessionStore::in_memory()).unwrap();
    let err = AuthPage::new(api)
        .login(&login_form("elif", "secret1"))
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "Giriş başarısız");
}

#[tokio::test]
async fn login_without_token_is_not_stored() {
    let backend = MockBackend::start().await.unwrap();
    backend.reply_json(
        Method::POST,
        "/api/auth/login",
        StatusCode::OK,
        json!({"access_token": "", "user": user_json(&user(7, "elif", false))}),
    );

    let store = SessionStore::in_memory();
    let api = backend.client(store.clone()).unwrap();
    let err = AuthPage::new(api)
        .login(&login_form("elif", "secret1"))
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "Token alınamadı, lütfen tekrar deneyin");
    assert!(store.load().unwrap().is_none());
}

#[tokio::test]
async fn invalid_login_form_sends_nothing() {
    let backend = MockBackend::start().await.unwrap();
    let api = backend.client(SessionStore::in_memory()).unwrap();

    let err = AuthPage::new(api)
        .login(&login_form("", "secret1"))
        .await
        .unwrap_err();
    assert!(matches!(err, ControllerError::Validation(_)));
    assert!(backend.requests().is_empty());
}

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
async fn register_posts_json_and_signs_in() {
    let backend = MockBackend::start().await.unwrap();
    let can = user(9, "can", false);
    backend.reply_json(
        Method::POST,
        "/api/auth/register",
        StatusCode::OK,
        json!({"access_token": "jwt-new", "token_type": "bearer", "user": user_json(&can)}),
    );

    let store = SessionStore::in_memory();
    let api = backend.client(store.clone()).unwrap();
    let form = RegisterForm {
        email: " Can@Example.com ".to_owned(),
        username: "can".to_owned(),
        password: SecretString::from("secret1".to_owned()),
    };
    let session = AuthPage::new(api).register(&form).await.unwrap();
    assert_eq!(session.user.username, "can");

    let request = &backend.requests_to("/api/auth/register")[0];
    assert_eq!(request.content_type.as_deref(), Some("application/json"));
    let body = request.json();
    assert_eq!(body["username"], "can");
    assert_eq!(body["password"], "secret1");
    assert!(request.authorization.is_none());
}

#[tokio::test]
async fn register_joins_validation_errors() {
    let backend = MockBackend::start().await.unwrap();
    backend.reply_json(
        Method::POST,
        "/api/auth/register",
        StatusCode::UNPROCESSABLE_ENTITY,
        json!({"detail": [
            {"loc": ["body", "email"], "msg": "geçersiz e-posta"},
            {"loc": ["body", "username"], "msg": "kullanıcı adı alınmış"}
        ]}),
    );

    let api = backend.client(SessionStore::in_memory()).unwrap();
    let form = RegisterForm {
        email: "can@example.com".to_owned(),
        username: "can".to_owned(),
        password: SecretString::from("secret1".to_owned()),
    };
    let err = AuthPage::new(api).register(&form).await.unwrap_err();
    assert_eq!(
        err.user_message(),
        "geçersiz e-posta; kullanıcı adı alınmış"
    );
}

// ============================================================================
// Authenticated calls
// ============================================================================

#[tokio::test]
async fn authenticated_call_sends_bearer_token() {
    let backend = MockBackend::start().await.unwrap();
    let elif = user(7, "elif", false);
    backend.reply_json(Method::GET, "/api/auth/me", StatusCode::OK, user_json(&elif));

    let api = backend.client(signed_in(elif.clone()).unwrap()).unwrap();
    assert_eq!(api.me().await.unwrap(), elif);

    let request = &backend.requests_to("/api/auth/me")[0];
    assert_eq!(
        request.authorization.as_deref(),
        Some(format!("Bearer {TEST_TOKEN}").as_str())
    );
}

#[tokio::test]
async fn no_authorization_header_without_token() {
    let backend = MockBackend::start().await.unwrap();
    backend.reply_json(
        Method::GET,
        "/api/config/",
        StatusCode::OK,
        json!({"sehirler": [], "ulkeler": [], "kategoriler": []}),
    );

    let api = backend.client(SessionStore::in_memory()).unwrap();
    api.app_settings().await.unwrap();

    assert!(backend.requests()[0].authorization.is_none());
}

#[tokio::test]
async fn expired_token_clears_session() {
    let backend = MockBackend::start().await.unwrap();
    backend.reply_json(
        Method::GET,
        "/api/dashboard/stats",
        StatusCode::UNAUTHORIZED,
        json!({"detail": "Could not validate credentials"}),
    );

    let store = signed_in(user(7, "elif", false)).unwrap();
    let api = backend.client(store.clone()).unwrap();
    let err = leadscout_client::pages::DashboardPage::new(api)
        .load()
        .await
        .unwrap_err();

    assert!(matches!(err, ControllerError::LoginRequired));
    assert_eq!(err.redirect(), Some(Route::Login));
    assert!(store.token().unwrap().is_none());
    assert!(store.load().unwrap().is_none());
}

#[tokio::test]
async fn logout_clears_session() {
    let backend = MockBackend::start().await.unwrap();
    let store = signed_in(user(7, "elif", false)).unwrap();
    let api = backend.client(store.clone()).unwrap();

    assert_eq!(AuthPage::new(api).logout().unwrap(), Route::Login);
    assert!(store.load().unwrap().is_none());
    assert!(backend.requests().is_empty());
}

// ============================================================================
// Theme
// ============================================================================

#[tokio::test]
async fn theme_rejection_is_reported() {
    let backend = MockBackend::start().await.unwrap();
    backend.reply_json(
        Method::PATCH,
        "/api/theme/",
        StatusCode::OK,
        json!({"error": "Geçersiz tema"}),
    );

    let api = backend.client(signed_in(user(7, "elif", false)).unwrap()).unwrap();
    let err = api.update_theme(Theme::Light).await.unwrap_err();
    assert!(matches!(err, ApiError::Rejected(ref m) if m == "Geçersiz tema"));
}

#[tokio::test]
async fn theme_switch_keeps_local_change_when_backend_refuses() {
    let backend = MockBackend::start().await.unwrap();
    backend.reply_json(
        Method::PATCH,
        "/api/theme/",
        StatusCode::OK,
        json!({"error": "Geçersiz tema"}),
    );

    let store = signed_in(user(7, "elif", false)).unwrap();
    let switcher = ThemeSwitcher::new(backend.client(store.clone()).unwrap());

    assert_eq!(switcher.toggle().await.unwrap(), Theme::Light);
    assert_eq!(store.load().unwrap().unwrap().user.theme, Theme::Light);

    let request = &backend.requests_to("/api/theme/")[0];
    assert_eq!(request.method, Method::PATCH);
    assert_eq!(request.json(), json!({"theme": "light"}));
}

#[tokio::test]
async fn theme_switch_signed_out_stays_local() {
    let backend = MockBackend::start().await.unwrap();
    let switcher = ThemeSwitcher::new(backend.client(SessionStore::in_memory()).unwrap());

    assert_eq!(switcher.apply(Theme::Light).await.unwrap(), Theme::Light);
    assert!(backend.requests().is_empty());
}
