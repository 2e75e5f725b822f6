// src/dtos/item.rs
use serde::{Deserialize, Serialize};

use crate::models::item::Item;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    pub id: i64,
    pub product_id: i64,
    pub quantity: i32,
}

// No item endpoints yet; request DTOs are here for when they land
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    pub product_id: i64,
    pub quantity: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    pub quantity: Option<i32>,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            product_id: item.product_id,
            quantity: item.quantity,
        }
    }
}
