//! API functions for the product details form.

use contracts::domain::a001_product::{ProductFormData, ProductId};
use gloo_net::http::Request;
use serde::Deserialize;

const BASE_URL: &str = "/api/products";

#[derive(Debug, Clone, Deserialize)]
pub struct SaveProductResponse {
    pub id: ProductId,
}

/// Catalog reference entry used by the category/brand dropdowns.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogRef {
    pub id: i64,
    pub name: String,
}

/// Fetch a product for editing.
pub async fn fetch_product(id: ProductId) -> Result<ProductFormData, String> {
    Request::get(&format!("{}/{}", BASE_URL, id.as_string()))
        .send()
        .await
        .map_err(|e| e.to_string())?
        .json()
        .await
        .map_err(|e| e.to_string())
}

/// Create or update a product.
pub async fn save_product(
    id: Option<ProductId>,
    form: &ProductFormData,
) -> Result<SaveProductResponse, String> {
    let request = match id {
        Some(id) => Request::put(&format!("{}/{}", BASE_URL, id.as_string())),
        None => Request::post(BASE_URL),
    };
    let response = request
        .json(form)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !response.ok() {
        return Err(format!("Ошибка сохранения: HTTP {}", response.status()));
    }
    response.json().await.map_err(|e| e.to_string())
}

pub async fn fetch_categories() -> Result<Vec<CatalogRef>, String> {
    Request::get("/api/categories")
        .send()
        .await
        .map_err(|e| e.to_string())?
        .json()
        .await
        .map_err(|e| e.to_string())
}

pub async fn fetch_brands() -> Result<Vec<CatalogRef>, String> {
    Request::get("/api/brands")
        .send()
        .await
        .map_err(|e| e.to_string())?
        .json()
        .await
        .map_err(|e| e.to_string())
}
