// src/dtos/product.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dtos::item::ItemResponse;
use crate::models::product::Product;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub product_name: String,
    pub created_by: String,
}

// Partial update: absent fields leave the stored values untouched
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub product_name: Option<String>,
    pub modified_by: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: i64,
    pub product_name: String,
    pub created_by: String,
    pub created_on: DateTime<Utc>,
    pub modified_by: Option<String>,
    pub modified_on: Option<DateTime<Utc>>,
    pub items: Vec<ItemResponse>,
}

// Page envelope: one slice of results plus the filter-wide total
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    pub products: Vec<ProductResponse>,
    pub total_count: i64,
    pub page_number: i64,
    pub page_size: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProductsParams {
    #[serde(default = "default_page_number")]
    pub page_number: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
    #[serde(default)]
    pub search_term: Option<String>,
}

fn default_page_number() -> i64 {
    1
}

fn default_page_size() -> i64 {
    10
}

// Convert from Model to Response DTO
impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            product_name: product.product_name,
            created_by: product.created_by,
            created_on: product.created_on,
            modified_by: product.modified_by,
            modified_on: product.modified_on,
            items: product.items.into_iter().map(ItemResponse::from).collect(),
        }
    }
}
