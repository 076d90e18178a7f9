use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use kardex::api::{AuthApi, ProductsApi};
use kardex::catalog::CatalogStore;
use kardex::notify::MemorySink;
use kardex::session::credentials::{CredentialStore, MemoryCredentialStore, TOKEN_KEY, USER_KEY};
use kardex::session::SessionStore;

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("kardex.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

#[allow(dead_code)]
pub fn sample_product(id: u64, title: &str, price: f64, stock: i64, category: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": format!("{} description", title),
        "price": price,
        "discountPercentage": 10.5,
        "rating": 4.7,
        "stock": stock,
        "brand": "Essence",
        "category": category,
        "thumbnail": "https://cdn.example.com/thumb.jpg",
        "images": ["https://cdn.example.com/1.jpg"]
    })
}

#[allow(dead_code)]
pub fn product_page(products: Vec<Value>, total: u64) -> Value {
    let limit = products.len();
    json!({ "products": products, "total": total, "skip": 0, "limit": limit })
}

#[allow(dead_code)]
pub fn login_body() -> Value {
    json!({
        "id": 1,
        "username": "emilys",
        "email": "emily@example.com",
        "firstName": "Emily",
        "lastName": "Johnson",
        "gender": "female",
        "image": "https://cdn.example.com/emily.png",
        "accessToken": "token-abc",
        "refreshToken": "refresh-xyz"
    })
}

#[allow(dead_code)]
pub fn profile_json() -> String {
    json!({
        "id": 1,
        "username": "emilys",
        "email": "emily@example.com",
        "firstName": "Emily",
        "lastName": "Johnson",
        "gender": "female",
        "image": "https://cdn.example.com/emily.png"
    })
    .to_string()
}

#[allow(dead_code)]
pub fn anonymous_catalog(base_url: &str) -> (Arc<MemorySink>, CatalogStore) {
    let sink = Arc::new(MemorySink::new());
    let session = Arc::new(SessionStore::new(
        AuthApi::new(base_url, 5).expect("auth client"),
        Box::new(MemoryCredentialStore::new()),
        sink.clone(),
    ));
    let catalog = CatalogStore::new(
        ProductsApi::new(base_url, 5).expect("products client"),
        session,
        sink.clone(),
    );
    (sink, catalog)
}

#[allow(dead_code)]
pub fn authenticated_catalog(base_url: &str, token: &str) -> (Arc<MemorySink>, CatalogStore) {
    let sink = Arc::new(MemorySink::new());

    let credentials = MemoryCredentialStore::new();
    credentials.put(TOKEN_KEY, token).expect("seed token");
    credentials.put(USER_KEY, &profile_json()).expect("seed user");

    let session = Arc::new(SessionStore::new(
        AuthApi::new(base_url, 5).expect("auth client"),
        Box::new(credentials),
        sink.clone(),
    ));
    session.restore();

    let catalog = CatalogStore::new(
        ProductsApi::new(base_url, 5).expect("products client"),
        session,
        sink.clone(),
    );
    (sink, catalog)
}
