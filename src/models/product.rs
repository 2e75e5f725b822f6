use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::models::item::Item;

#[derive(Debug, Clone, FromRow)]
pub struct Product {
    pub id: i64,
    pub product_name: String,
    pub created_by: String,
    pub created_on: DateTime<Utc>,
    pub modified_by: Option<String>,
    pub modified_on: Option<DateTime<Utc>>,
    // Owned items, materialized explicitly by the repository
    #[sqlx(skip)]
    pub items: Vec<Item>,
}

// Insert payload; the id is assigned by the database
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub product_name: String,
    pub created_by: String,
    pub created_on: DateTime<Utc>,
}
