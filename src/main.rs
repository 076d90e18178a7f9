//! Kardex - Product catalog management CLI
//!
//! Main entry point for the Kardex application.

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use kardex::cli::{Cli, Commands, ProductCommand};
use kardex::commands;
use kardex::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    init_tracing();

    // Parse command line arguments
    let cli = Cli::parse_args();

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/kardex.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Login { username, password } => {
            tracing::info!("Starting login for user: {}", username);
            commands::auth::login(config, username, password).await?;
            Ok(())
        }
        Commands::Logout => {
            tracing::info!("Clearing stored session");
            commands::auth::logout(config)?;
            Ok(())
        }
        Commands::Whoami { json } => {
            commands::auth::whoami(config, json)?;
            Ok(())
        }
        Commands::Products { command } => match command {
            ProductCommand::List {
                limit,
                page,
                sort_by,
                order,
                category,
                sort_price,
                filter,
                json,
            } => {
                tracing::info!("Listing products, page {}", page);
                let args = commands::products::ListArgs {
                    limit,
                    page,
                    sort_by,
                    order,
                    category,
                    sort_price,
                    filter,
                    json,
                };
                commands::products::list(config, args).await?;
                Ok(())
            }
            ProductCommand::Search {
                query,
                limit,
                page,
                json,
            } => {
                tracing::info!("Searching products for: {}", query);
                commands::products::search(config, query, limit, page, json).await?;
                Ok(())
            }
            ProductCommand::Show { id, json } => {
                tracing::info!("Showing product {}", id);
                commands::products::show(config, id, json).await?;
                Ok(())
            }
            ProductCommand::Categories { json } => {
                tracing::info!("Listing product categories");
                commands::products::categories(config, json).await?;
                Ok(())
            }
            ProductCommand::Create {
                title,
                description,
                price,
                stock,
                category,
                brand,
                json,
            } => {
                tracing::info!("Creating product");
                let args = commands::products::CreateArgs {
                    title,
                    description,
                    price,
                    stock,
                    category,
                    brand,
                    json,
                };
                commands::products::create(config, args).await?;
                Ok(())
            }
            ProductCommand::Update {
                id,
                title,
                description,
                price,
                stock,
                category,
                brand,
                json,
            } => {
                tracing::info!("Updating product {}", id);
                let args = commands::products::UpdateArgs {
                    id,
                    title,
                    description,
                    price,
                    stock,
                    category,
                    brand,
                    json,
                };
                commands::products::update(config, args).await?;
                Ok(())
            }
            ProductCommand::Delete { id, json } => {
                tracing::info!("Deleting product {}", id);
                commands::products::delete(config, id, json).await?;
                Ok(())
            }
        },
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kardex=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
