//! Product catalog commands for Kardex
//!
//! Handlers for the `products` subcommands, plus the table and JSON
//! rendering they share. Every handler restores the stored session
//! first and refuses to run anonymously.

use prettytable::{row, Table};

use crate::api::types::{
    category_label, format_price, skip_for_page, total_pages, PageQuery, Product, SortOrder,
};
use crate::catalog::CatalogState;
use crate::config::Config;
use crate::error::{KardexError, Result};
use crate::validation::{
    validate_product, validate_product_update, ProductDraft, ProductUpdateDraft,
};

/// Arguments for `products list`
#[derive(Debug, Clone, Default)]
pub struct ListArgs {
    pub limit: Option<u32>,
    pub page: u32,
    pub sort_by: Option<String>,
    pub order: Option<SortOrder>,
    pub category: Option<String>,
    pub sort_price: Option<SortOrder>,
    pub filter: Option<String>,
    pub json: bool,
}

/// Arguments for `products create`
///
/// Field presence is checked by validation, not the CLI parser, so the
/// user sees the same messages the original form rules define.
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub stock: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub json: bool,
}

/// Arguments for `products update`
#[derive(Debug, Clone, Default)]
pub struct UpdateArgs {
    pub id: u64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub stock: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub json: bool,
}

/// List one page of products
///
/// Server-side paging, sorting, and category scoping run first; the
/// optional client-side price re-sort and category narrowing are then
/// applied to the fetched page.
pub async fn list(config: Config, args: ListArgs) -> Result<()> {
    let session = super::require_session(&config)?;
    let mut catalog = super::build_catalog(&config, session)?;

    let limit = args.limit.unwrap_or(config.catalog.page_size);
    let page_query = PageQuery {
        limit: Some(limit),
        skip: Some(skip_for_page(args.page, limit)),
        sort_by: args.sort_by.clone(),
        order: args.order,
    };

    match &args.category {
        Some(category) => {
            catalog.fetch_by_category(category, &page_query).await?;
        }
        None => {
            catalog.fetch_list(&page_query).await?;
        }
    }

    if let Some(order) = args.sort_price {
        catalog.sort_by_price(order);
    }

    if let Some(category) = &args.filter {
        catalog.filter_by_category(category).await?;
    }

    render_page(catalog.state(), args.page, limit, args.json)
}

/// Search products by text query
pub async fn search(
    config: Config,
    query: String,
    limit: Option<u32>,
    page: u32,
    json: bool,
) -> Result<()> {
    let session = super::require_session(&config)?;
    let mut catalog = super::build_catalog(&config, session)?;

    let limit = limit.unwrap_or(config.catalog.page_size);
    let page_query = PageQuery {
        limit: Some(limit),
        skip: Some(skip_for_page(page, limit)),
        sort_by: None,
        order: None,
    };

    catalog.search(&query, &page_query).await?;

    render_page(catalog.state(), page, limit, json)
}

/// Show one product in detail
pub async fn show(config: Config, id: u64, json: bool) -> Result<()> {
    let session = super::require_session(&config)?;
    let mut catalog = super::build_catalog(&config, session)?;

    let product = catalog.fetch_by_id(id).await?;
    render_product(&product, json)
}

/// List the known product categories
pub async fn categories(config: Config, json: bool) -> Result<()> {
    let session = super::require_session(&config)?;
    let mut catalog = super::build_catalog(&config, session)?;

    let categories = catalog.fetch_categories().await;

    if json {
        let out = serde_json::to_string_pretty(&categories).map_err(KardexError::Serialization)?;
        println!("{}", out);
        return Ok(());
    }

    if categories.is_empty() {
        println!("No hay categorías disponibles");
        return Ok(());
    }

    let mut table = Table::new();
    table.add_row(row!["Slug", "Nombre"]);
    for slug in &categories {
        table.add_row(row![slug, category_label(slug)]);
    }

    println!();
    table.printstd();
    println!();

    Ok(())
}

/// Create a product from the given field values
pub async fn create(config: Config, args: CreateArgs) -> Result<()> {
    let session = super::require_session(&config)?;
    let mut catalog = super::build_catalog(&config, session)?;

    let draft = ProductDraft {
        title: args.title.unwrap_or_default(),
        description: args.description.unwrap_or_default(),
        price: args.price.unwrap_or_default(),
        stock: args.stock.unwrap_or_default(),
        category: args.category.unwrap_or_default(),
        brand: args.brand,
    };

    let payload = validate_product(&draft).map_err(KardexError::Validation)?;

    let product = catalog.create(&payload).await?;
    render_product(&product, args.json)
}

/// Update fields of an existing product
pub async fn update(config: Config, args: UpdateArgs) -> Result<()> {
    let session = super::require_session(&config)?;
    let mut catalog = super::build_catalog(&config, session)?;

    let draft = ProductUpdateDraft {
        title: args.title,
        description: args.description,
        price: args.price,
        stock: args.stock,
        category: args.category,
        brand: args.brand,
    };

    let payload = validate_product_update(&draft).map_err(KardexError::Validation)?;

    if payload.is_empty() {
        return Err(KardexError::Config(
            "At least one field must be provided: --title, --description, --price, --stock, \
             --category, --brand"
                .to_string(),
        )
        .into());
    }

    let product = catalog.update(args.id, &payload).await?;
    render_product(&product, args.json)
}

/// Delete a product
///
/// The notification sink reports the outcome; `--json` additionally
/// prints the deleted product as returned by the server.
pub async fn delete(config: Config, id: u64, json: bool) -> Result<()> {
    let session = super::require_session(&config)?;
    let mut catalog = super::build_catalog(&config, session)?;

    let product = catalog.delete(id).await?;

    if json {
        return render_product(&product, true);
    }

    Ok(())
}

/// Render the current catalog page as a table or JSON
fn render_page(state: &CatalogState, page: u32, limit: u32, json: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(&state.items).map_err(KardexError::Serialization)?;
        println!("{}", out);
        return Ok(());
    }

    if state.items.is_empty() {
        println!("No hay productos para mostrar");
        return Ok(());
    }

    print_product_table(&state.items);
    println!(
        "Página {} de {} ({} productos en total)",
        page,
        total_pages(state.total, limit),
        state.total
    );
    println!();

    Ok(())
}

/// Print products in table format
fn print_product_table(products: &[Product]) {
    let mut table = Table::new();
    table.add_row(row![
        "ID",
        "Título",
        "Precio",
        "Stock",
        "Estado",
        "Categoría",
        "Marca"
    ]);

    for product in products {
        table.add_row(row![
            product.id,
            product.title,
            format_price(product.price),
            product.stock,
            product.stock_status(),
            category_label(&product.category),
            product.brand.as_deref().unwrap_or("-")
        ]);
    }

    println!();
    table.printstd();
}

/// Print one product in detailed format or JSON
fn render_product(product: &Product, json: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(product).map_err(KardexError::Serialization)?;
        println!("{}", out);
        return Ok(());
    }

    println!("\nProducto #{}\n", product.id);
    println!("Título:       {}", product.title);
    println!("Descripción:  {}", product.description);
    println!("Precio:       {}", format_price(product.price));
    if product.discount_percentage > 0.0 {
        println!("Descuento:    {}", product.discount_label());
    }
    println!(
        "Rating:       {} ({})",
        product.rating,
        product.rounded_rating()
    );
    println!(
        "Stock:        {} ({})",
        product.stock,
        product.stock_status()
    );
    println!("Categoría:    {}", category_label(&product.category));
    if let Some(brand) = &product.brand {
        println!("Marca:        {}", brand);
    }
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::credentials::{CredentialStore, FileCredentialStore, TOKEN_KEY, USER_KEY};
    use tempfile::TempDir;

    fn offline_config(dir: &TempDir) -> Config {
        let mut config = Config::default();
        config.api.base_url = "http://127.0.0.1:9".to_string();
        config.api.timeout_seconds = 1;
        config.session.credentials_dir = Some(dir.path().to_path_buf());
        config
    }

    fn seed_session(dir: &TempDir) {
        let store = FileCredentialStore::new_with_dir(dir.path()).unwrap();
        store.put(TOKEN_KEY, "token-abc").unwrap();
        store
            .put(USER_KEY, &crate::test_utils::sample_profile_json())
            .unwrap();
    }

    #[tokio::test]
    async fn test_list_without_session_is_gated() {
        let dir = TempDir::new().unwrap();
        let config = offline_config(&dir);

        let err = list(config, ListArgs::default()).await.unwrap_err();
        assert!(err.to_string().contains("No hay sesión activa"));
    }

    #[tokio::test]
    async fn test_show_without_session_is_gated() {
        let dir = TempDir::new().unwrap();
        let config = offline_config(&dir);

        let err = show(config, 1, false).await.unwrap_err();
        assert!(err.to_string().contains("No hay sesión activa"));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_draft_before_any_request() {
        let dir = TempDir::new().unwrap();
        let config = offline_config(&dir);
        seed_session(&dir);

        // No fields at all: validation fires without touching the network
        let err = create(config, CreateArgs::default()).await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("El título es requerido"));
        assert!(message.contains("El precio es requerido"));
    }

    #[tokio::test]
    async fn test_update_requires_at_least_one_field() {
        let dir = TempDir::new().unwrap();
        let config = offline_config(&dir);
        seed_session(&dir);

        let args = UpdateArgs {
            id: 7,
            ..UpdateArgs::default()
        };
        let err = update(config, args).await.unwrap_err();
        assert!(err.to_string().contains("At least one field"));
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_field_value() {
        let dir = TempDir::new().unwrap();
        let config = offline_config(&dir);
        seed_session(&dir);

        let args = UpdateArgs {
            id: 7,
            price: Some("gratis".to_string()),
            ..UpdateArgs::default()
        };
        let err = update(config, args).await.unwrap_err();
        assert!(err
            .to_string()
            .contains("El precio debe ser un número válido"));
    }

    #[test]
    fn test_render_product_json_round_trips() {
        let product: Product = serde_json::from_value(serde_json::json!({
            "id": 1,
            "title": "Essence Mascara Lash Princess",
            "price": 9.99,
            "stock": 5,
            "category": "beauty"
        }))
        .unwrap();

        assert!(render_product(&product, true).is_ok());
        assert!(render_product(&product, false).is_ok());
    }

    #[test]
    fn test_render_page_handles_empty_state() {
        let state = CatalogState::default();
        assert!(render_page(&state, 1, 30, false).is_ok());
        assert!(render_page(&state, 1, 30, true).is_ok());
    }
}
