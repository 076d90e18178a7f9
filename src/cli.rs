//! Command-line interface definition for Kardex
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for session management and product catalog
//! operations.

use clap::{Parser, Subcommand};

use crate::api::types::SortOrder;

/// Kardex - Product catalog management CLI
///
/// Browse, search, and maintain a product catalog backed by a
/// remote products API.
#[derive(Parser, Debug, Clone)]
#[command(name = "kardex")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/kardex.yaml")]
    pub config: Option<String>,

    /// Override the API base URL from config
    #[arg(long)]
    pub api_base: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Kardex
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Sign in to the products API and store the session
    Login {
        /// Account username
        #[arg(short, long, env = "KARDEX_USERNAME")]
        username: String,

        /// Account password
        #[arg(short, long, env = "KARDEX_PASSWORD")]
        password: String,
    },

    /// Clear the stored session
    Logout,

    /// Show the signed-in user
    Whoami {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Browse and maintain the product catalog
    Products {
        /// Product subcommand
        #[command(subcommand)]
        command: ProductCommand,
    },
}

/// Product catalog subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ProductCommand {
    /// List products one page at a time
    List {
        /// Products per page (defaults to catalog.page_size from config)
        #[arg(short, long)]
        limit: Option<u32>,

        /// Page number, 1-based
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Server-side sort field (e.g. title, price, rating)
        #[arg(long)]
        sort_by: Option<String>,

        /// Server-side sort direction
        #[arg(long, value_enum)]
        order: Option<SortOrder>,

        /// Fetch only products from this category (server-side)
        #[arg(short, long)]
        category: Option<String>,

        /// Re-sort the fetched page by price (client-side)
        #[arg(long, value_enum)]
        sort_price: Option<SortOrder>,

        /// Narrow the fetched page to this category (client-side)
        #[arg(long)]
        filter: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search products by text query
    Search {
        /// Search query
        query: String,

        /// Products per page (defaults to catalog.page_size from config)
        #[arg(short, long)]
        limit: Option<u32>,

        /// Page number, 1-based
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one product in detail
    Show {
        /// Product id
        id: u64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the known product categories
    Categories {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a product
    Create {
        /// Product title
        #[arg(long)]
        title: Option<String>,

        /// Product description
        #[arg(long)]
        description: Option<String>,

        /// Product price (e.g. 59.99)
        #[arg(long)]
        price: Option<String>,

        /// Units in stock
        #[arg(long)]
        stock: Option<String>,

        /// Category slug (e.g. electronics)
        #[arg(long)]
        category: Option<String>,

        /// Brand name (optional)
        #[arg(long)]
        brand: Option<String>,

        /// Output the created product as JSON
        #[arg(long)]
        json: bool,
    },

    /// Update fields of an existing product
    Update {
        /// Product id
        id: u64,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// New price
        #[arg(long)]
        price: Option<String>,

        /// New stock count
        #[arg(long)]
        stock: Option<String>,

        /// New category slug
        #[arg(long)]
        category: Option<String>,

        /// New brand name
        #[arg(long)]
        brand: Option<String>,

        /// Output the updated product as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a product
    Delete {
        /// Product id
        id: u64,

        /// Output the deleted product as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/kardex.yaml".to_string()),
            api_base: None,
            verbose: false,
            command: Commands::Logout,
        }
    }
}
