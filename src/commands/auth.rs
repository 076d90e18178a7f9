//! Session commands for Kardex
//!
//! Handlers for `login`, `logout`, and `whoami`.

use crate::config::Config;
use crate::error::{KardexError, Result};

/// Sign in to the products API and persist the session
///
/// The session store prints the outcome through its notification sink;
/// a failed login additionally surfaces as an error so the process
/// exits non-zero.
///
/// # Arguments
///
/// * `config` - Global configuration (consumed)
/// * `username` - Account username
/// * `password` - Account password
pub async fn login(config: Config, username: String, password: String) -> Result<()> {
    let session = super::build_session(&config)?;

    if session.login(&username, &password).await {
        Ok(())
    } else {
        Err(KardexError::Session("No se pudo iniciar sesión".to_string()).into())
    }
}

/// Clear the stored session
///
/// Safe to run when no session is stored.
pub fn logout(config: Config) -> Result<()> {
    let session = super::build_session(&config)?;
    session.logout();
    Ok(())
}

/// Show the signed-in user
///
/// # Arguments
///
/// * `config` - Global configuration (consumed)
/// * `json` - Output the profile as pretty-printed JSON
pub fn whoami(config: Config, json: bool) -> Result<()> {
    let session = super::require_session(&config)?;

    let user = session
        .user()
        .ok_or_else(|| KardexError::Session(super::MSG_NO_SESSION.to_string()))?;

    if json {
        let out = serde_json::to_string_pretty(&user).map_err(KardexError::Serialization)?;
        println!("{}", out);
        return Ok(());
    }

    println!("\nSesión activa\n");
    println!("Usuario:   {}", user.username);
    println!("Nombre:    {}", user.full_name());
    println!("Correo:    {}", user.email);
    println!();

    Ok(())
}
