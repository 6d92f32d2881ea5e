//! End-to-end tests of the `leadscout` binary.
//!
//! The backend address points at a closed port, so only behavior decided
//! before or without a successful request is covered here. Flows against a
//! live backend live in the integration-tests crate.

#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const UNREACHABLE: &str = "http://127.0.0.1:9";

fn leadscout(session_file: &Path) -> Command {
    let mut cmd = Command::cargo_bin("leadscout").unwrap();
    cmd.env("LEADSCOUT_API_BASE", UNREACHABLE)
        .env("LEADSCOUT_SESSION_FILE", session_file)
        .env("LEADSCOUT_TIMEOUT_SECS", "2")
        .env_remove("LEADSCOUT_PASSWORD")
        .env_remove("SENTRY_DSN")
        .env_remove("RUST_LOG");
    cmd
}

fn write_session(path: &Path, is_admin: bool) {
    let user = serde_json::json!({
        "id": 1,
        "username": "elif",
        "email": "elif@example.com",
        "balance": 40,
        "is_admin": is_admin,
        "theme": "dark"
    });
    let entries = serde_json::json!({
        "token": "test-token",
        "user": user.to_string(),
    });
    std::fs::write(path, entries.to_string()).unwrap();
}

fn stored_user(path: &Path) -> serde_json::Value {
    let entries: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    serde_json::from_str(entries["user"].as_str().unwrap()).unwrap()
}

// =============================================================================
// Help and version
// =============================================================================

#[test]
fn help_lists_commands() {
    let dir = TempDir::new().unwrap();
    leadscout(&dir.path().join("session.json"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("companies"))
        .stdout(predicate::str::contains("admin"));
}

#[test]
fn version_flag() {
    let dir = TempDir::new().unwrap();
    leadscout(&dir.path().join("session.json"))
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("leadscout"));
}

#[test]
fn unknown_sort_column_is_rejected() {
    let dir = TempDir::new().unwrap();
    leadscout(&dir.path().join("session.json"))
        .args(["companies", "list", "--sort", "fiyat"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown column"));
}

// =============================================================================
// Signed out
// =============================================================================

#[test]
fn dashboard_requires_login() {
    let dir = TempDir::new().unwrap();
    leadscout(&dir.path().join("session.json"))
        .arg("dashboard")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Lütfen giriş yapın"))
        .stderr(predicate::str::contains("leadscout login"));
}

#[test]
fn whoami_requires_login() {
    let dir = TempDir::new().unwrap();
    leadscout(&dir.path().join("session.json"))
        .arg("whoami")
        .assert()
        .failure()
        .stderr(predicate::str::contains("leadscout login"));
}

#[test]
fn login_validates_before_any_request() {
    let dir = TempDir::new().unwrap();
    leadscout(&dir.path().join("session.json"))
        .args(["login", "-u", "elif", "-p", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Lütfen tüm alanları doldurun"));
}

#[test]
fn register_checks_password_length() {
    let dir = TempDir::new().unwrap();
    leadscout(&dir.path().join("session.json"))
        .args(["register", "-e", "elif@example.com", "-u", "elif"])
        .write_stdin("12345\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Şifre en az 6 karakter olmalı"));
}

#[test]
fn login_reports_unreachable_backend() {
    let dir = TempDir::new().unwrap();
    let session = dir.path().join("session.json");
    leadscout(&session)
        .args(["login", "-u", "elif"])
        .write_stdin("secret1\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Giriş başarısız"));
    assert!(!session.exists());
}

// =============================================================================
// Signed in
// =============================================================================

#[test]
fn search_validates_category_first() {
    let dir = TempDir::new().unwrap();
    let session = dir.path().join("session.json");
    write_session(&session, false);

    leadscout(&session)
        .args(["search", "--sehir", "Antalya", "--limit", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Lütfen kategori girin"));
}

#[test]
fn search_requires_city_or_all_cities() {
    let dir = TempDir::new().unwrap();
    let session = dir.path().join("session.json");
    write_session(&session, false);

    leadscout(&session)
        .args(["search", "--kategori", "Restoran"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Tüm Şehirler"));
}

#[test]
fn admin_commands_forbidden_for_regular_users() {
    let dir = TempDir::new().unwrap();
    let session = dir.path().join("session.json");
    write_session(&session, false);

    leadscout(&session)
        .args(["admin", "users"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Bu sayfaya erişim yetkiniz yok"));
}

#[test]
fn credit_amount_validated_before_any_request() {
    let dir = TempDir::new().unwrap();
    let session = dir.path().join("session.json");
    write_session(&session, true);

    leadscout(&session)
        .args(["admin", "credit", "4", "-5", "Hata"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Geçerli bir kredi miktarı girin"));
}

#[test]
fn delete_needs_confirmation() {
    let dir = TempDir::new().unwrap();
    let session = dir.path().join("session.json");
    write_session(&session, false);

    leadscout(&session)
        .args(["companies", "delete", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));
}

#[test]
fn blank_activity_type_rejected() {
    let dir = TempDir::new().unwrap();
    let session = dir.path().join("session.json");
    write_session(&session, false);

    leadscout(&session)
        .args(["companies", "activity", "add", "3", "  "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Lütfen aktivite tipi seçin"));
}

#[test]
fn theme_switch_is_kept_locally_when_backend_is_down() {
    let dir = TempDir::new().unwrap();
    let session = dir.path().join("session.json");
    write_session(&session, false);

    leadscout(&session)
        .args(["theme", "light"])
        .assert()
        .success()
        .stdout(predicate::str::contains("light"));
    assert_eq!(stored_user(&session)["theme"], "light");

    leadscout(&session)
        .arg("theme")
        .assert()
        .success()
        .stdout(predicate::str::contains("☀️ light"));
}

#[test]
fn logout_clears_session() {
    let dir = TempDir::new().unwrap();
    let session = dir.path().join("session.json");
    write_session(&session, false);

    leadscout(&session)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Çıkış yapıldı"));

    leadscout(&session)
        .arg("dashboard")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Lütfen giriş yapın"));
}
