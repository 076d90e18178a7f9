//! Kardex - Product catalog management CLI library
//!
//! This library provides the core functionality for the Kardex catalog client,
//! including product validation rules, session management, catalog operations,
//! and the remote API collaborators.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `api`: HTTP collaborators and wire types for the remote products API
//! - `validation`: Product form validation rules with user-facing messages
//! - `session`: Session store and credential persistence
//! - `catalog`: Product catalog store and its operation envelope
//! - `notify`: Notification sink abstraction for user-facing signals
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//! - `commands`: CLI command handlers
//!
//! # Example
//!
//! ```no_run
//! use kardex::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/kardex.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     // Store wiring would go here
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod notify;
pub mod session;
pub mod validation;

// Re-export commonly used types
pub use api::types::{PageQuery, Product, ProductPage, SortOrder, UserProfile};
pub use catalog::{CatalogState, CatalogStore};
pub use config::Config;
pub use error::{ApiError, KardexError, Result};
pub use notify::{NotificationSink, Severity};
pub use session::SessionStore;
pub use validation::{
    validate_product, validate_product_update, FieldErrors, ProductDraft, ProductUpdateDraft,
};

#[cfg(test)]
pub mod test_utils;
