//! Wire types for the remote products API.
//!
//! Request and response shapes follow the DummyJSON contract: camelCase
//! field names, paginated list envelopes, and create/update echoes that
//! return only the submitted fields. Response-only fields are defaulted so
//! partial echoes and older API versions both decode.
//!
//! Presentation helpers used by the terminal renderer live here too, next
//! to the types they describe.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// A product record as returned by the remote API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub discount_percentage: f64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub stock: i64,
    /// Absent for unbranded products
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability_status: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reviews: Vec<Review>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ProductMeta>,
}

/// Physical dimensions reported for a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub depth: f64,
}

/// A customer review attached to a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub reviewer_name: String,
    #[serde(default)]
    pub reviewer_email: String,
}

/// Record metadata attached by newer API versions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductMeta {
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub barcode: String,
    #[serde(default)]
    pub qr_code: String,
}

/// Paginated list envelope for product endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub total: u64,
    #[serde(default)]
    pub skip: u64,
    #[serde(default)]
    pub limit: u64,
}

/// Authenticated user snapshot, taken from the login response
///
/// This is the shape persisted under the `user` storage key; changing it
/// changes the storage format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub image: String,
}

impl UserProfile {
    /// First and last name joined for display
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Response of `POST /auth/login`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub image: String,
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
}

impl LoginResponse {
    /// Extracts the persistable user snapshot from the response
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            gender: self.gender.clone(),
            image: self.image.clone(),
        }
    }
}

/// Body of `POST /products/add`, produced by draft validation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateProductPayload {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
}

/// Body of `PUT /products/{id}`; only provided fields travel
///
/// The target id is part of the URL, not the body.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateProductPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
}

impl UpdateProductPayload {
    /// True when no field is provided, meaning the update would be a no-op
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.stock.is_none()
            && self.category.is_none()
            && self.brand.is_none()
    }
}

/// Sort direction for server-side ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Wire value for the `order` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pagination and ordering for list requests
///
/// Absent fields are omitted from the query string, leaving the server's
/// defaults in effect.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageQuery {
    pub limit: Option<u32>,
    pub skip: Option<u32>,
    pub sort_by: Option<String>,
    pub order: Option<SortOrder>,
}

impl PageQuery {
    /// Builds the query pairs in wire order: `limit, skip, sortBy, order`
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(skip) = self.skip {
            pairs.push(("skip", skip.to_string()));
        }
        if let Some(sort_by) = &self.sort_by {
            pairs.push(("sortBy", sort_by.clone()));
        }
        if let Some(order) = self.order {
            pairs.push(("order", order.as_str().to_string()));
        }
        pairs
    }
}

/// Number of pages needed to show `total` items, `page_size` at a time
pub fn total_pages(total: u64, page_size: u32) -> u64 {
    if page_size == 0 {
        return 0;
    }
    let size = u64::from(page_size);
    (total + size - 1) / size
}

/// Items to skip so that the response starts at 1-based `page`
pub fn skip_for_page(page: u32, page_size: u32) -> u32 {
    page.saturating_sub(1).saturating_mul(page_size)
}

// ---------------------------------------------------------------------------
// Presentation helpers
// ---------------------------------------------------------------------------

/// Stock level bucket shown alongside a product
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    /// User-facing label for this bucket
    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::InStock => "En stock",
            StockStatus::LowStock => "Bajo stock",
            StockStatus::OutOfStock => "Agotado",
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Product {
    /// Buckets the stock count: above 10 in stock, 1..=10 low, 0 out
    pub fn stock_status(&self) -> StockStatus {
        if self.stock > 10 {
            StockStatus::InStock
        } else if self.stock > 0 {
            StockStatus::LowStock
        } else {
            StockStatus::OutOfStock
        }
    }

    /// Discount badge text, rounding half away from zero (`10.5` → `-11%`)
    pub fn discount_label(&self) -> String {
        format!("-{}%", self.discount_percentage.round() as i64)
    }

    /// Rating rounded to the nearest whole star
    pub fn rounded_rating(&self) -> i64 {
        self.rating.round() as i64
    }
}

/// Formats a price with currency symbol and two decimals
pub fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}

/// Turns a category slug into a display label (`mens-shirts` → `Mens Shirts`)
pub fn category_label(slug: &str) -> String {
    slug.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
