//! Integration tests for the session store lifecycle
//!
//! Covers the full login/restore/logout cycle against a mock auth endpoint,
//! including what gets persisted and which messages reach the user.

mod common;

use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kardex::api::AuthApi;
use kardex::notify::MemorySink;
use kardex::session::credentials::{
    CredentialStore, FileCredentialStore, MemoryCredentialStore, TOKEN_KEY, USER_KEY,
};
use kardex::session::SessionStore;
use kardex::Severity;

fn memory_session(base_url: &str) -> (Arc<MemorySink>, SessionStore) {
    let sink = Arc::new(MemorySink::new());
    let session = SessionStore::new(
        AuthApi::new(base_url, 5).expect("auth client"),
        Box::new(MemoryCredentialStore::new()),
        sink.clone(),
    );
    (sink, session)
}

fn file_session(base_url: &str, dir: &TempDir) -> (Arc<MemorySink>, SessionStore) {
    let sink = Arc::new(MemorySink::new());
    let credentials =
        FileCredentialStore::new_with_dir(dir.path().to_path_buf()).expect("credential store");
    let session = SessionStore::new(
        AuthApi::new(base_url, 5).expect("auth client"),
        Box::new(credentials),
        sink.clone(),
    );
    (sink, session)
}

/// A successful login stores the token, persists both keys, and greets the user
#[tokio::test]
async fn test_login_success_persists_and_greets() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({
            "username": "emilys",
            "password": "emilyspass",
            "expiresInMins": 60
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::login_body()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().expect("tempdir");
    let (sink, session) = file_session(&server.uri(), &dir);

    assert!(session.login("emilys", "emilyspass").await);
    assert!(session.is_authenticated());
    assert_eq!(session.auth_header().as_deref(), Some("Bearer token-abc"));
    assert_eq!(
        session.user().map(|u| u.full_name()),
        Some("Emily Johnson".to_string())
    );
    assert!(session.error().is_none());
    assert!(!session.is_loading());

    let store = FileCredentialStore::new_with_dir(dir.path().to_path_buf()).expect("store");
    assert_eq!(store.get(TOKEN_KEY).expect("read"), Some("token-abc".to_string()));
    let user_json = store.get(USER_KEY).expect("read").expect("user persisted");
    assert!(user_json.contains("emilys"));

    assert!(sink.has(Severity::Success, "¡Bienvenido, Emily!"));
}

/// Rejected credentials record the server message and persist nothing
#[tokio::test]
async fn test_login_failure_keeps_server_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "Invalid credentials" })),
        )
        .mount(&server)
        .await;

    let dir = TempDir::new().expect("tempdir");
    let (sink, session) = file_session(&server.uri(), &dir);

    assert!(!session.login("emilys", "wrong").await);
    assert!(!session.is_authenticated());
    assert_eq!(session.error().as_deref(), Some("Invalid credentials"));
    assert!(sink.has(Severity::Error, "Invalid credentials"));

    let store = FileCredentialStore::new_with_dir(dir.path().to_path_buf()).expect("store");
    assert_eq!(store.get(TOKEN_KEY).expect("read"), None);
    assert_eq!(store.get(USER_KEY).expect("read"), None);
}

/// A rejection without a body falls back to the generic credentials message
#[tokio::test]
async fn test_login_failure_without_body_uses_fallback() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let (sink, session) = memory_session(&server.uri());

    assert!(!session.login("emilys", "wrong").await);
    assert_eq!(
        session.error().as_deref(),
        Some("Usuario o contraseña incorrectos")
    );
    assert!(sink.has(Severity::Error, "Usuario o contraseña incorrectos"));
}

/// A fresh store over the same directory picks the session back up
#[tokio::test]
async fn test_restore_round_trip_across_stores() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::login_body()))
        .mount(&server)
        .await;

    let dir = TempDir::new().expect("tempdir");
    let (_, first) = file_session(&server.uri(), &dir);
    assert!(first.login("emilys", "emilyspass").await);
    drop(first);

    let (_, second) = file_session(&server.uri(), &dir);
    assert!(!second.is_authenticated());
    second.restore();
    assert!(second.is_authenticated());
    assert_eq!(second.auth_header().as_deref(), Some("Bearer token-abc"));
    assert_eq!(
        second.user().map(|u| u.username),
        Some("emilys".to_string())
    );
}

/// Logout clears the persisted state so later restores stay anonymous
#[tokio::test]
async fn test_logout_clears_persisted_state() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::login_body()))
        .mount(&server)
        .await;

    let dir = TempDir::new().expect("tempdir");
    let (sink, session) = file_session(&server.uri(), &dir);
    assert!(session.login("emilys", "emilyspass").await);

    session.logout();
    assert!(!session.is_authenticated());
    assert!(session.auth_header().is_none());
    assert!(sink.has(Severity::Info, "Sesión cerrada"));

    let (_, fresh) = file_session(&server.uri(), &dir);
    fresh.restore();
    assert!(!fresh.is_authenticated());
    assert!(fresh.user().is_none());
}
