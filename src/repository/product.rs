// src/repository/product.rs
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::item::Item;
use crate::models::product::{NewProduct, Product};
use crate::repository::session::DbSession;
use crate::repository::ProductRepository;

const PRODUCT_COLUMNS: &str = "id, product_name, created_by, created_on, modified_by, modified_on";

pub struct PgProductRepository {
    session: Arc<DbSession>,
}

impl PgProductRepository {
    pub fn new(session: Arc<DbSession>) -> Self {
        Self { session }
    }

    async fn load_items(&self, products: &mut [Product]) -> Result<(), AppError> {
        if products.is_empty() {
            return Ok(());
        }

        let ids: Vec<i64> = products.iter().map(|p| p.id).collect();
        let items = sqlx::query_as::<_, Item>(
            "SELECT id, product_id, quantity FROM items WHERE product_id = ANY($1) ORDER BY id",
        )
        .bind(&ids)
        .fetch_all(self.session.pool())
        .await?;

        let mut by_product: HashMap<i64, Vec<Item>> = HashMap::new();
        for item in items {
            by_product.entry(item.product_id).or_default().push(item);
        }
        for product in products.iter_mut() {
            if let Some(items) = by_product.remove(&product.id) {
                product.items = items;
            }
        }
        Ok(())
    }
}

// Blank search terms mean no filter
fn normalized(search_term: Option<&str>) -> Option<&str> {
    search_term.map(str::trim).filter(|t| !t.is_empty())
}

// % and _ are LIKE wildcards; match them literally in user input
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn get_by_id(&self, id: i64, include_items: bool) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.session.pool())
        .await?;

        match product {
            Some(mut product) => {
                if include_items {
                    product.items = sqlx::query_as::<_, Item>(
                        "SELECT id, product_id, quantity FROM items WHERE product_id = $1 ORDER BY id",
                    )
                    .bind(id)
                    .fetch_all(self.session.pool())
                    .await?;
                }
                Ok(Some(product))
            }
            None => Ok(None),
        }
    }

    async fn get_all(
        &self,
        page_number: i64,
        page_size: i64,
        search_term: Option<&str>,
    ) -> Result<Vec<Product>, AppError> {
        let offset = (page_number - 1).saturating_mul(page_size).max(0);

        let mut products = match normalized(search_term) {
            Some(term) => {
                sqlx::query_as::<_, Product>(&format!(
                    "SELECT {PRODUCT_COLUMNS} FROM products
                     WHERE product_name ILIKE $1 OR created_by ILIKE $1
                     ORDER BY product_name ASC, id ASC
                     LIMIT $2 OFFSET $3"
                ))
                .bind(like_pattern(term))
                .bind(page_size)
                .bind(offset)
                .fetch_all(self.session.pool())
                .await?
            }
            None => {
                sqlx::query_as::<_, Product>(&format!(
                    "SELECT {PRODUCT_COLUMNS} FROM products
                     ORDER BY product_name ASC, id ASC
                     LIMIT $1 OFFSET $2"
                ))
                .bind(page_size)
                .bind(offset)
                .fetch_all(self.session.pool())
                .await?
            }
        };

        self.load_items(&mut products).await?;
        Ok(products)
    }

    async fn total_count(&self, search_term: Option<&str>) -> Result<i64, AppError> {
        let count = match normalized(search_term) {
            Some(term) => {
                sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM products
                     WHERE product_name ILIKE $1 OR created_by ILIKE $1",
                )
                .bind(like_pattern(term))
                .fetch_one(self.session.pool())
                .await?
            }
            None => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
                    .fetch_one(self.session.pool())
                    .await?
            }
        };
        Ok(count)
    }

    async fn add(&self, product: NewProduct) -> Result<Product, AppError> {
        let mut state = self.session.lock().await;
        state.ensure_tx(self.session.pool()).await?;
        let tx = state.tx_mut()?;

        let inserted = sqlx::query_as::<_, Product>(&format!(
            "INSERT INTO products (product_name, created_by, created_on)
             VALUES ($1, $2, $3)
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(&product.product_name)
        .bind(&product.created_by)
        .bind(product.created_on)
        .fetch_one(&mut **tx)
        .await?;

        state.pending += 1;
        Ok(inserted)
    }

    async fn update(&self, product: &Product) -> Result<(), AppError> {
        let mut state = self.session.lock().await;
        state.ensure_tx(self.session.pool()).await?;
        let tx = state.tx_mut()?;

        // created_by/created_on are immutable after insert and stay untouched
        sqlx::query(
            "UPDATE products
             SET product_name = $2, modified_by = $3, modified_on = $4
             WHERE id = $1",
        )
        .bind(product.id)
        .bind(&product.product_name)
        .bind(&product.modified_by)
        .bind(product.modified_on)
        .execute(&mut **tx)
        .await?;

        state.pending += 1;
        Ok(())
    }

    async fn delete(&self, product: &Product) -> Result<(), AppError> {
        let mut state = self.session.lock().await;
        state.ensure_tx(self.session.pool()).await?;
        let tx = state.tx_mut()?;

        // Owned items go with the product via ON DELETE CASCADE
        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(product.id)
            .execute(&mut **tx)
            .await?;

        state.pending += 1;
        Ok(())
    }

    async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(self.session.pool())
        .await?;
        Ok(exists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("10%_off\\"), "%10\\%\\_off\\\\%");
        assert_eq!(like_pattern("widget"), "%widget%");
    }

    #[test]
    fn blank_search_terms_are_dropped() {
        assert_eq!(normalized(None), None);
        assert_eq!(normalized(Some("")), None);
        assert_eq!(normalized(Some("   ")), None);
        assert_eq!(normalized(Some(" gadget ")), Some("gadget"));
    }
}
