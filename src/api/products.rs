//! Client for the product endpoints.
//!
//! Wraps the eight product operations of the remote API. Every method takes
//! the optional `Authorization` header value prepared by the session store;
//! `None` sends the request unauthenticated, which the demo API accepts for
//! reads.

use reqwest::Method;

use crate::api::types::{CreateProductPayload, PageQuery, Product, ProductPage, UpdateProductPayload};
use crate::error::ApiError;

/// Client for the product endpoints of the remote API
#[derive(Debug, Clone)]
pub struct ProductsApi {
    client: reqwest::Client,
    base_url: String,
}

impl ProductsApi {
    /// Creates a new products client against `base_url`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout_seconds: u64) -> Result<Self, ApiError> {
        let client = super::build_client(timeout_seconds)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Builds a request, attaching the auth header when one is available
    fn request(&self, method: Method, path: &str, auth: Option<&str>) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.client.request(method, &url);
        match auth {
            Some(header) => builder.header("Authorization", header),
            None => builder,
        }
    }

    /// Fetches a page of products: `GET /products`
    pub async fn fetch_page(
        &self,
        auth: Option<&str>,
        page: &PageQuery,
    ) -> Result<ProductPage, ApiError> {
        let response = self
            .request(Method::GET, "/products", auth)
            .query(&page.query_pairs())
            .send()
            .await?;
        super::decode(response).await
    }

    /// Searches products by free text: `GET /products/search?q=...`
    pub async fn search(
        &self,
        auth: Option<&str>,
        query: &str,
        page: &PageQuery,
    ) -> Result<ProductPage, ApiError> {
        let mut pairs = vec![("q", query.to_string())];
        pairs.extend(page.query_pairs());

        let response = self
            .request(Method::GET, "/products/search", auth)
            .query(&pairs)
            .send()
            .await?;
        super::decode(response).await
    }

    /// Fetches a page of one category: `GET /products/category/{category}`
    pub async fn by_category(
        &self,
        auth: Option<&str>,
        category: &str,
        page: &PageQuery,
    ) -> Result<ProductPage, ApiError> {
        let path = format!("/products/category/{}", category);
        let response = self
            .request(Method::GET, &path, auth)
            .query(&page.query_pairs())
            .send()
            .await?;
        super::decode(response).await
    }

    /// Fetches the category slugs: `GET /products/category-list`
    pub async fn categories(&self, auth: Option<&str>) -> Result<Vec<String>, ApiError> {
        let response = self
            .request(Method::GET, "/products/category-list", auth)
            .send()
            .await?;
        super::decode(response).await
    }

    /// Fetches a single product: `GET /products/{id}`
    pub async fn by_id(&self, auth: Option<&str>, id: u64) -> Result<Product, ApiError> {
        let path = format!("/products/{}", id);
        let response = self.request(Method::GET, &path, auth).send().await?;
        super::decode(response).await
    }

    /// Creates a product: `POST /products/add`
    ///
    /// The demo API echoes the submitted fields plus a generated id without
    /// persisting anything server-side.
    pub async fn create(
        &self,
        auth: Option<&str>,
        payload: &CreateProductPayload,
    ) -> Result<Product, ApiError> {
        let response = self
            .request(Method::POST, "/products/add", auth)
            .json(payload)
            .send()
            .await?;
        super::decode(response).await
    }

    /// Updates a product: `PUT /products/{id}` with only the provided fields
    pub async fn update(
        &self,
        auth: Option<&str>,
        id: u64,
        payload: &UpdateProductPayload,
    ) -> Result<Product, ApiError> {
        let path = format!("/products/{}", id);
        let response = self
            .request(Method::PUT, &path, auth)
            .json(payload)
            .send()
            .await?;
        super::decode(response).await
    }

    /// Deletes a product: `DELETE /products/{id}`
    ///
    /// The response is the deleted record.
    pub async fn delete(&self, auth: Option<&str>, id: u64) -> Result<Product, ApiError> {
        let path = format!("/products/{}", id);
        let response = self.request(Method::DELETE, &path, auth).send().await?;
        super::decode(response).await
    }
}
