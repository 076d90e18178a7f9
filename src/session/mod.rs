//! Authenticated session lifecycle.
//!
//! [`SessionStore`] owns the auth token and user snapshot for the current
//! process and keeps them in sync with durable client storage, so a later
//! run can restore the session without logging in again. The store has two
//! states: Anonymous (no token) and Authenticated (token plus user).
//!
//! State lives behind a `RwLock` so the store can be shared (`Arc`) with the
//! catalog store, which asks for the auth header on every request. Writes
//! are last-write-wins and issued sequentially by the command layer.

pub mod credentials;

use std::fmt;
use std::sync::{Arc, RwLock};

use crate::api::types::UserProfile;
use crate::api::AuthApi;
use crate::notify::{NotificationSink, Severity};
use credentials::{CredentialStore, TOKEN_KEY, USER_KEY};

/// Message shown when login fails and the server supplied no reason
const LOGIN_FALLBACK: &str = "Usuario o contraseña incorrectos";

#[derive(Debug, Default)]
struct SessionState {
    token: Option<String>,
    user: Option<UserProfile>,
    error: Option<String>,
    is_loading: bool,
}

/// Auth session state machine backed by durable client storage
///
/// `login` is the only operation that talks to the network; `logout` and
/// `restore` work purely against the credential store. None of the
/// operations return errors to the caller: failures surface as the stored
/// `error` message, a sink signal, and a log line.
pub struct SessionStore {
    api: AuthApi,
    credentials: Box<dyn CredentialStore>,
    sink: Arc<dyn NotificationSink>,
    state: RwLock<SessionState>,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("api", &self.api)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Creates an anonymous session store
    ///
    /// Call [`SessionStore::restore`] afterwards to pick up a persisted
    /// session.
    pub fn new(
        api: AuthApi,
        credentials: Box<dyn CredentialStore>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            api,
            credentials,
            sink,
            state: RwLock::new(SessionState::default()),
        }
    }

    /// Authenticates against the remote API
    ///
    /// On success the token and user snapshot are kept in memory and
    /// persisted under the [`TOKEN_KEY`] and [`USER_KEY`] storage keys;
    /// persistence failures are logged but do not fail the login. On
    /// rejection the server message, or `"Usuario o contraseña incorrectos"`
    /// when it sent none, is recorded and signaled.
    ///
    /// Returns whether the session is now authenticated. Never returns an
    /// error and never retries.
    pub async fn login(&self, username: &str, password: &str) -> bool {
        if let Ok(mut state) = self.state.write() {
            state.is_loading = true;
            state.error = None;
        }

        let result = self.api.login(username, password).await;

        match result {
            Ok(response) => {
                let profile = response.profile();
                if let Ok(mut state) = self.state.write() {
                    state.token = Some(response.access_token.clone());
                    state.user = Some(profile.clone());
                    state.error = None;
                    state.is_loading = false;
                }
                self.persist(&response.access_token, &profile);
                tracing::info!(username = %profile.username, "Session established");
                self.sink.notify(
                    Severity::Success,
                    &format!("¡Bienvenido, {}!", profile.first_name),
                );
                true
            }
            Err(e) => {
                let message = e.user_message(LOGIN_FALLBACK);
                tracing::error!(error = %e, "Login failed");
                if let Ok(mut state) = self.state.write() {
                    state.error = Some(message.clone());
                    state.is_loading = false;
                }
                self.sink.notify(Severity::Error, &message);
                false
            }
        }
    }

    /// Ends the session
    ///
    /// Clears the in-memory state and deletes both storage keys. Storage
    /// failures are logged, never propagated; logout always succeeds from
    /// the caller's point of view.
    pub fn logout(&self) {
        if let Ok(mut state) = self.state.write() {
            state.token = None;
            state.user = None;
            state.error = None;
            state.is_loading = false;
        }

        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.credentials.delete(key) {
                tracing::warn!("Failed to clear stored credential {}: {}", key, e);
            }
        }

        tracing::info!("Session cleared");
        self.sink.notify(
            Severity::Info,
            "Sesión cerrada. Usa `kardex login` para iniciar una nueva sesión.",
        );
    }

    /// Rehydrates the session from durable storage
    ///
    /// Runs once per process start. Both keys must be present; a present but
    /// unparseable user snapshot means corrupt storage, and the whole
    /// session is cleared via [`SessionStore::logout`]. With either key
    /// absent the store simply stays anonymous.
    pub fn restore(&self) {
        let token = match self.credentials.get(TOKEN_KEY) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Failed to read stored token: {}", e);
                None
            }
        };
        let user_json = match self.credentials.get(USER_KEY) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Failed to read stored user profile: {}", e);
                None
            }
        };

        let (token, user_json) = match (token, user_json) {
            (Some(token), Some(user_json)) => (token, user_json),
            _ => {
                tracing::debug!("No stored session to restore");
                return;
            }
        };

        match serde_json::from_str::<UserProfile>(&user_json) {
            Ok(profile) => {
                if let Ok(mut state) = self.state.write() {
                    state.token = Some(token);
                    state.user = Some(profile.clone());
                }
                tracing::info!(username = %profile.username, "Session restored");
            }
            Err(e) => {
                tracing::error!("Stored user profile is corrupt, clearing session: {}", e);
                self.logout();
            }
        }
    }

    /// True when a token is held
    pub fn is_authenticated(&self) -> bool {
        self.state
            .read()
            .map(|s| s.token.is_some())
            .unwrap_or(false)
    }

    /// The raw bearer token, when authenticated
    pub fn token(&self) -> Option<String> {
        self.state.read().ok().and_then(|s| s.token.clone())
    }

    /// The authenticated user snapshot, when available
    pub fn user(&self) -> Option<UserProfile> {
        self.state.read().ok().and_then(|s| s.user.clone())
    }

    /// The last recorded login error message
    pub fn error(&self) -> Option<String> {
        self.state.read().ok().and_then(|s| s.error.clone())
    }

    /// True while a login request is in flight
    pub fn is_loading(&self) -> bool {
        self.state.read().map(|s| s.is_loading).unwrap_or(false)
    }

    /// `Authorization` header value for API requests
    ///
    /// `None` when anonymous; the products client then sends the request
    /// without the header.
    pub fn auth_header(&self) -> Option<String> {
        self.token().map(|token| format!("Bearer {}", token))
    }

    fn persist(&self, token: &str, profile: &UserProfile) {
        if let Err(e) = self.credentials.put(TOKEN_KEY, token) {
            tracing::warn!("Failed to persist auth token: {}", e);
        }
        match serde_json::to_string(profile) {
            Ok(json) => {
                if let Err(e) = self.credentials.put(USER_KEY, &json) {
                    tracing::warn!("Failed to persist user profile: {}", e);
                }
            }
            Err(e) => tracing::warn!("Failed to serialize user profile: {}", e),
        }
    }
}
