//! Field validation for product drafts.
//!
//! Validation runs before any network call: drafts carry raw form input
//! (numeric fields as strings), and the validators coerce and check them,
//! producing either a typed payload or the per-field error messages shown
//! to the user. All checks are synchronous and side-effect-free.
//!
//! Rules per field, applied first-failure-wins while every field is still
//! checked independently:
//!
//! - title: required, 3..=100 characters
//! - description: required, 10..=500 characters
//! - price: required, numeric, greater than zero
//! - stock: required, numeric, integral, not negative (zero is valid)
//! - category: required, at least 2 characters
//! - brand: optional, but at least 2 characters when present
//!
//! Values are trimmed before length checks and lengths count characters,
//! not bytes.

use std::fmt;

use crate::api::types::{CreateProductPayload, UpdateProductPayload};

// ---------------------------------------------------------------------------
// Error collection
// ---------------------------------------------------------------------------

/// A single failed field with its user-facing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Payload field name (`title`, `price`, ...)
    pub field: &'static str,
    /// User-facing message, in Spanish
    pub message: String,
}

/// Validation failures for a product draft, in schema field order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    /// Creates an empty collection
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Records a failure for `field`
    pub fn push(&mut self, field: &'static str, message: String) {
        self.0.push(FieldError { field, message });
    }

    /// Returns true when no field failed
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failed fields
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Looks up the message recorded for `field`, if any
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Iterates failures in schema field order
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{}", joined)
    }
}

impl std::error::Error for FieldErrors {}

// ---------------------------------------------------------------------------
// Draft inputs
// ---------------------------------------------------------------------------

/// Raw form input for creating a product
///
/// Numeric fields arrive as strings and are coerced during validation.
#[derive(Debug, Clone, Default)]
pub struct ProductDraft {
    pub title: String,
    pub description: String,
    pub price: String,
    pub stock: String,
    pub category: String,
    /// Optional; blank input is treated the same as absent
    pub brand: Option<String>,
}

/// Raw form input for a partial product update
///
/// Only provided fields are validated; absent fields stay untouched on the
/// server. A provided field must pass the full rule set for that field.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdateDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub stock: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
}

// ---------------------------------------------------------------------------
// Per-field rules
// ---------------------------------------------------------------------------

fn validate_title(raw: &str) -> Result<String, String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err("El título es requerido".to_string());
    }
    let len = value.chars().count();
    if len < 3 {
        return Err("El título debe tener al menos 3 caracteres".to_string());
    }
    if len > 100 {
        return Err("El título no puede exceder 100 caracteres".to_string());
    }
    Ok(value.to_string())
}

fn validate_description(raw: &str) -> Result<String, String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err("La descripción es requerida".to_string());
    }
    let len = value.chars().count();
    if len < 10 {
        return Err("La descripción debe tener al menos 10 caracteres".to_string());
    }
    if len > 500 {
        return Err("La descripción no puede exceder 500 caracteres".to_string());
    }
    Ok(value.to_string())
}

fn validate_price(raw: &str) -> Result<f64, String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err("El precio es requerido".to_string());
    }
    let number: f64 = value
        .parse()
        .map_err(|_| "El precio debe ser un número válido".to_string())?;
    if !number.is_finite() {
        return Err("El precio debe ser un número válido".to_string());
    }
    if number <= 0.0 {
        return Err("El precio debe ser mayor a 0".to_string());
    }
    Ok(number)
}

fn validate_stock(raw: &str) -> Result<i64, String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err("El stock es requerido".to_string());
    }
    let number: f64 = value
        .parse()
        .map_err(|_| "El stock debe ser un número válido".to_string())?;
    if number.is_nan() {
        return Err("El stock debe ser un número válido".to_string());
    }
    if number.fract() != 0.0 {
        return Err("El stock debe ser un número entero".to_string());
    }
    if number < 0.0 {
        return Err("El stock no puede ser negativo".to_string());
    }
    Ok(number as i64)
}

fn validate_category(raw: &str) -> Result<String, String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err("La categoría es requerida".to_string());
    }
    if value.chars().count() < 2 {
        return Err("La categoría debe tener al menos 2 caracteres".to_string());
    }
    Ok(value.to_string())
}

fn validate_brand(raw: &str) -> Result<Option<String>, String> {
    let value = raw.trim();
    if value.is_empty() {
        return Ok(None);
    }
    if value.chars().count() < 2 {
        return Err("La marca debe tener al menos 2 caracteres".to_string());
    }
    Ok(Some(value.to_string()))
}

// ---------------------------------------------------------------------------
// Draft validation
// ---------------------------------------------------------------------------

/// Validates a create draft and builds the payload sent to the API
///
/// All fields are checked independently, so a draft with several bad fields
/// reports every failure in one pass. Payload values are the trimmed inputs
/// with numeric fields coerced.
///
/// # Errors
///
/// Returns [`FieldErrors`] with one entry per failed field, in schema order.
///
/// # Examples
///
/// ```
/// use kardex::validation::{validate_product, ProductDraft};
///
/// let draft = ProductDraft {
///     title: "Teclado mecánico".to_string(),
///     description: "Teclado mecánico retroiluminado".to_string(),
///     price: "59.99".to_string(),
///     stock: "25".to_string(),
///     category: "electronics".to_string(),
///     brand: None,
/// };
/// let payload = validate_product(&draft).unwrap();
/// assert_eq!(payload.price, 59.99);
/// assert_eq!(payload.stock, 25);
/// ```
pub fn validate_product(draft: &ProductDraft) -> Result<CreateProductPayload, FieldErrors> {
    let mut errors = FieldErrors::new();
    let mut payload = CreateProductPayload::default();

    match validate_title(&draft.title) {
        Ok(value) => payload.title = value,
        Err(message) => errors.push("title", message),
    }
    match validate_description(&draft.description) {
        Ok(value) => payload.description = value,
        Err(message) => errors.push("description", message),
    }
    match validate_price(&draft.price) {
        Ok(value) => payload.price = value,
        Err(message) => errors.push("price", message),
    }
    match validate_stock(&draft.stock) {
        Ok(value) => payload.stock = value,
        Err(message) => errors.push("stock", message),
    }
    match validate_category(&draft.category) {
        Ok(value) => payload.category = value,
        Err(message) => errors.push("category", message),
    }
    if let Some(brand) = &draft.brand {
        match validate_brand(brand) {
            Ok(value) => payload.brand = value,
            Err(message) => errors.push("brand", message),
        }
    }

    if errors.is_empty() {
        Ok(payload)
    } else {
        Err(errors)
    }
}

/// Validates an update draft, checking only the fields it provides
///
/// Each provided field runs the same rules as in [`validate_product`].
/// Absent fields are omitted from the payload so the server leaves them
/// untouched.
///
/// # Errors
///
/// Returns [`FieldErrors`] with one entry per failed provided field.
pub fn validate_product_update(
    draft: &ProductUpdateDraft,
) -> Result<UpdateProductPayload, FieldErrors> {
    let mut errors = FieldErrors::new();
    let mut payload = UpdateProductPayload::default();

    if let Some(title) = &draft.title {
        match validate_title(title) {
            Ok(value) => payload.title = Some(value),
            Err(message) => errors.push("title", message),
        }
    }
    if let Some(description) = &draft.description {
        match validate_description(description) {
            Ok(value) => payload.description = Some(value),
            Err(message) => errors.push("description", message),
        }
    }
    if let Some(price) = &draft.price {
        match validate_price(price) {
            Ok(value) => payload.price = Some(value),
            Err(message) => errors.push("price", message),
        }
    }
    if let Some(stock) = &draft.stock {
        match validate_stock(stock) {
            Ok(value) => payload.stock = Some(value),
            Err(message) => errors.push("stock", message),
        }
    }
    if let Some(category) = &draft.category {
        match validate_category(category) {
            Ok(value) => payload.category = Some(value),
            Err(message) => errors.push("category", message),
        }
    }
    if let Some(brand) = &draft.brand {
        match validate_brand(brand) {
            Ok(value) => payload.brand = value,
            Err(message) => errors.push("brand", message),
        }
    }

    if errors.is_empty() {
        Ok(payload)
    } else {
        Err(errors)
    }
}
