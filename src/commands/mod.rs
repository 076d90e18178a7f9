/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes two top-level command modules:

- `auth`     — Session commands: login, logout, whoami
- `products` — Product catalog commands: list, search, show, categories,
               create, update, delete

These handlers are intentionally small and use the library components:
API collaborators, the session store, and the catalog store.
*/

use std::sync::Arc;

use crate::api::{AuthApi, ProductsApi};
use crate::catalog::CatalogStore;
use crate::config::Config;
use crate::error::{KardexError, Result};
use crate::notify::{NotificationSink, TerminalSink};
use crate::session::credentials::{CredentialStore, FileCredentialStore};
use crate::session::SessionStore;

// Session commands
pub mod auth;

// Product catalog commands
pub mod products;

/// User-facing message when a command needs a session and none is stored
pub(crate) const MSG_NO_SESSION: &str =
    "No hay sesión activa. Ejecuta `kardex login` para iniciar sesión.";

/// Build the session store from configuration
///
/// Uses the configured credentials directory when set, otherwise the
/// platform data directory.
pub(crate) fn build_session(config: &Config) -> Result<Arc<SessionStore>> {
    let api = AuthApi::new(&config.api.base_url, config.api.timeout_seconds)?;

    let credentials: Box<dyn CredentialStore> = match &config.session.credentials_dir {
        Some(dir) => Box::new(FileCredentialStore::new_with_dir(dir.clone())?),
        None => Box::new(FileCredentialStore::new()?),
    };

    let sink: Arc<dyn NotificationSink> = Arc::new(TerminalSink);
    Ok(Arc::new(SessionStore::new(api, credentials, sink)))
}

/// Build a catalog store that shares the given session
pub(crate) fn build_catalog(config: &Config, session: Arc<SessionStore>) -> Result<CatalogStore> {
    let api = ProductsApi::new(&config.api.base_url, config.api.timeout_seconds)?;
    let sink: Arc<dyn NotificationSink> = Arc::new(TerminalSink);
    Ok(CatalogStore::new(api, session, sink))
}

/// Restore the stored session and require it to be authenticated
///
/// # Errors
///
/// Returns `KardexError::Session` when no valid session is stored
pub(crate) fn require_session(config: &Config) -> Result<Arc<SessionStore>> {
    let session = build_session(config)?;
    session.restore();

    if !session.is_authenticated() {
        return Err(KardexError::Session(MSG_NO_SESSION.to_string()).into());
    }

    Ok(session)
}
