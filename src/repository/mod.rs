// src/repository/mod.rs
pub mod product;
pub mod session;
pub mod unit_of_work;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::product::{NewProduct, Product};

/// Data-access contract for products. Absence is `None`, never an error.
/// Mutations run on the session transaction and become visible to other
/// connections only once the unit of work commits.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Fetches one product; `include_items` materializes the owned items.
    async fn get_by_id(&self, id: i64, include_items: bool) -> Result<Option<Product>, AppError>;

    /// One page, ordered by product name ascending. The search term matches
    /// product name or creator, case-insensitively; blank means no filter.
    async fn get_all(
        &self,
        page_number: i64,
        page_size: i64,
        search_term: Option<&str>,
    ) -> Result<Vec<Product>, AppError>;

    /// Row count under the same filter as `get_all`, ignoring pagination.
    async fn total_count(&self, search_term: Option<&str>) -> Result<i64, AppError>;

    /// Inserts and returns the product with its generated id.
    async fn add(&self, product: NewProduct) -> Result<Product, AppError>;

    async fn update(&self, product: &Product) -> Result<(), AppError>;

    async fn delete(&self, product: &Product) -> Result<(), AppError>;

    async fn exists(&self, id: i64) -> Result<bool, AppError>;
}

/// Transaction boundary for a batch of repository mutations.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Commits pending mutations and returns how many were flushed.
    /// With nothing pending this is a safe no-op returning 0.
    async fn save_changes(&self) -> Result<u64, AppError>;

    /// Explicit demarcation for multi-step sequences. `save_changes` under
    /// an explicit transaction flushes without committing it.
    async fn begin_transaction(&self) -> Result<(), AppError>;

    async fn commit_transaction(&self) -> Result<(), AppError>;

    async fn rollback_transaction(&self) -> Result<(), AppError>;
}
