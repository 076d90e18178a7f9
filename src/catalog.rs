//! Product catalog store.
//!
//! [`CatalogStore`] holds the client-side view of the remote product
//! catalog: the current page of items, the selected product, the server's
//! total count, and the loading/error flags every operation maintains.
//!
//! Network operations share one envelope: loading goes up and the previous
//! error clears before the request; loading drops on both outcomes; a
//! failure records the server message (or the operation's fallback) in
//! `error`, signals the sink, logs, and re-raises. Local patches after
//! create/update/delete are applied only once the server confirmed the
//! operation.
//!
//! Operations take `&mut self`, so two mutating calls on one store cannot
//! overlap; per-store requests are serialized by construction.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::api::types::{
    CreateProductPayload, PageQuery, Product, ProductPage, SortOrder, UpdateProductPayload,
};
use crate::api::ProductsApi;
use crate::error::{ApiError, KardexError, Result};
use crate::notify::{NotificationSink, Severity};
use crate::session::SessionStore;

const MSG_LOAD_LIST: &str = "Error al cargar productos";
const MSG_SEARCH: &str = "Error al buscar productos";
const MSG_LOAD_ONE: &str = "Error al cargar el producto";
const MSG_CREATE: &str = "Error al crear el producto";
const MSG_UPDATE: &str = "Error al actualizar el producto";
const MSG_DELETE: &str = "Error al eliminar el producto";

/// Client-side catalog state
///
/// `items` and `total` mirror the last list-shaped response; `current` is
/// the last product fetched by id. `total` always reflects the last server
/// answer plus any confirmed local patches, even when `items` holds a
/// narrowed or re-sorted page.
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    pub items: Vec<Product>,
    pub current: Option<Product>,
    pub total: u64,
    pub categories: BTreeSet<String>,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Stateful store for the product catalog
///
/// Shares the [`SessionStore`] so every request carries the auth header of
/// the moment, and a [`NotificationSink`] that receives operation outcome
/// signals. State is exposed read-only through [`CatalogStore::state`].
pub struct CatalogStore {
    api: ProductsApi,
    session: Arc<SessionStore>,
    sink: Arc<dyn NotificationSink>,
    state: CatalogState,
}

impl CatalogStore {
    /// Creates an empty store
    pub fn new(api: ProductsApi, session: Arc<SessionStore>, sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            api,
            session,
            sink,
            state: CatalogState::default(),
        }
    }

    /// Read-only view of the current state
    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    fn begin(&mut self) {
        self.state.is_loading = true;
        self.state.error = None;
    }

    /// Finishes an operation: drops the loading flag and, on failure,
    /// records the user message, signals the sink, and re-raises
    fn settle<T>(&mut self, result: std::result::Result<T, ApiError>, fallback: &str) -> Result<T> {
        self.state.is_loading = false;
        match result {
            Ok(value) => Ok(value),
            Err(e) => {
                let message = e.user_message(fallback);
                tracing::error!(error = %e, "Catalog request failed");
                self.state.error = Some(message.clone());
                self.sink.notify(Severity::Error, &message);
                Err(KardexError::Api(e).into())
            }
        }
    }

    /// Fetches a page of products and replaces `items` and `total`
    ///
    /// # Errors
    ///
    /// Fails with the server message or `"Error al cargar productos"`; the
    /// previous `items` are kept on failure.
    pub async fn fetch_list(&mut self, page: &PageQuery) -> Result<ProductPage> {
        self.begin();
        let auth = self.session.auth_header();
        let result = self.api.fetch_page(auth.as_deref(), page).await;
        let response = self.settle(result, MSG_LOAD_LIST)?;

        self.state.items = response.products.clone();
        self.state.total = response.total;
        Ok(response)
    }

    /// Fetches a page of one category (server-side filter)
    ///
    /// Same state replacement and failure behavior as
    /// [`CatalogStore::fetch_list`].
    pub async fn fetch_by_category(
        &mut self,
        category: &str,
        page: &PageQuery,
    ) -> Result<ProductPage> {
        self.begin();
        let auth = self.session.auth_header();
        let result = self.api.by_category(auth.as_deref(), category, page).await;
        let response = self.settle(result, MSG_LOAD_LIST)?;

        self.state.items = response.products.clone();
        self.state.total = response.total;
        Ok(response)
    }

    /// Searches products by free text
    ///
    /// A blank query delegates to [`CatalogStore::fetch_list`] with the same
    /// pagination and emits no search signals. Otherwise the result replaces
    /// `items`/`total` and the sink receives an Info signal when nothing
    /// matched or a Success signal with the total count.
    ///
    /// # Errors
    ///
    /// Fails with the server message or `"Error al buscar productos"`.
    pub async fn search(&mut self, query: &str, page: &PageQuery) -> Result<ProductPage> {
        if query.trim().is_empty() {
            return self.fetch_list(page).await;
        }

        self.begin();
        let auth = self.session.auth_header();
        let result = self.api.search(auth.as_deref(), query, page).await;
        let response = self.settle(result, MSG_SEARCH)?;

        self.state.items = response.products.clone();
        self.state.total = response.total;

        if self.state.items.is_empty() {
            self.sink.notify(
                Severity::Info,
                &format!("No se encontraron productos para \"{}\"", query),
            );
        } else {
            self.sink.notify(
                Severity::Success,
                &format!("Se encontraron {} productos", response.total),
            );
        }
        Ok(response)
    }

    /// Fetches one product by id into `current`
    ///
    /// `items` are left untouched.
    ///
    /// # Errors
    ///
    /// Fails with the server message or `"Error al cargar el producto"`.
    pub async fn fetch_by_id(&mut self, id: u64) -> Result<Product> {
        self.begin();
        let auth = self.session.auth_header();
        let result = self.api.by_id(auth.as_deref(), id).await;
        let product = self.settle(result, MSG_LOAD_ONE)?;

        self.state.current = Some(product.clone());
        Ok(product)
    }

    /// Fetches the available category slugs
    ///
    /// Failures are deliberately swallowed: the error is logged, `error`
    /// stays untouched, and an empty set comes back so category-driven UI
    /// renders without choices instead of failing. On success the set is
    /// also cached in `state.categories`.
    pub async fn fetch_categories(&mut self) -> BTreeSet<String> {
        self.state.is_loading = true;
        let auth = self.session.auth_header();
        let result = self.api.categories(auth.as_deref()).await;
        self.state.is_loading = false;

        match result {
            Ok(list) => {
                let categories: BTreeSet<String> = list.into_iter().collect();
                self.state.categories = categories.clone();
                categories
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load categories, continuing with none");
                BTreeSet::new()
            }
        }
    }

    /// Creates a product and patches the local page
    ///
    /// Callers validate the draft first. On success the returned record is
    /// prepended to `items` and `total` grows by one, making the new product
    /// visible without a refetch.
    ///
    /// # Errors
    ///
    /// Fails with the server message or `"Error al crear el producto"`; no
    /// local patch happens on failure.
    pub async fn create(&mut self, payload: &CreateProductPayload) -> Result<Product> {
        self.begin();
        let auth = self.session.auth_header();
        let result = self.api.create(auth.as_deref(), payload).await;
        let product = self.settle(result, MSG_CREATE)?;

        self.state.items.insert(0, product.clone());
        self.state.total += 1;
        self.sink
            .notify(Severity::Success, "Producto creado exitosamente");
        Ok(product)
    }

    /// Updates a product and patches the local page in place
    ///
    /// The matching `items` entry, when present, is replaced without moving
    /// position; `current` is replaced too when it holds the same id.
    ///
    /// # Errors
    ///
    /// Fails with the server message or `"Error al actualizar el producto"`.
    pub async fn update(&mut self, id: u64, payload: &UpdateProductPayload) -> Result<Product> {
        self.begin();
        let auth = self.session.auth_header();
        let result = self.api.update(auth.as_deref(), id, payload).await;
        let product = self.settle(result, MSG_UPDATE)?;

        if let Some(slot) = self.state.items.iter_mut().find(|p| p.id == id) {
            *slot = product.clone();
        }
        if self.state.current.as_ref().map(|c| c.id) == Some(id) {
            self.state.current = Some(product.clone());
        }
        self.sink
            .notify(Severity::Success, "Producto actualizado exitosamente");
        Ok(product)
    }

    /// Deletes a product and patches the local page
    ///
    /// The matching entry leaves `items`. `total` drops by one even when the
    /// id was not on the cached page; `saturating_sub` keeps it from
    /// underflowing.
    ///
    /// # Errors
    ///
    /// Fails with the server message or `"Error al eliminar el producto"`.
    pub async fn delete(&mut self, id: u64) -> Result<Product> {
        self.begin();
        let auth = self.session.auth_header();
        let result = self.api.delete(auth.as_deref(), id).await;
        let product = self.settle(result, MSG_DELETE)?;

        self.state.items.retain(|p| p.id != id);
        self.state.total = self.state.total.saturating_sub(1);
        self.sink
            .notify(Severity::Success, "Producto eliminado exitosamente");
        Ok(product)
    }

    /// Re-sorts the cached page by price, client-side
    ///
    /// Stable: items with equal prices keep their relative order. No
    /// network traffic and no change to `total`.
    pub fn sort_by_price(&mut self, order: SortOrder) {
        self.state.items.sort_by(|a, b| match order {
            SortOrder::Asc => a.price.total_cmp(&b.price),
            SortOrder::Desc => b.price.total_cmp(&a.price),
        });
    }

    /// Narrows the cached page to one category, client-side
    ///
    /// Matching is case-insensitive on the exact category name. `total` is
    /// left at the last server count. A blank category delegates to
    /// [`CatalogStore::fetch_list`] with default pagination, restoring the
    /// unfiltered view.
    ///
    /// # Errors
    ///
    /// Only the blank-category delegation can fail, with the same behavior
    /// as [`CatalogStore::fetch_list`].
    pub async fn filter_by_category(&mut self, category: &str) -> Result<()> {
        if category.trim().is_empty() {
            self.fetch_list(&PageQuery::default()).await?;
            return Ok(());
        }

        let needle = category.to_lowercase();
        self.state.items.retain(|p| p.category.to_lowercase() == needle);
        Ok(())
    }
}
