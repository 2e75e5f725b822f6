// src/services/product.rs
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use sqlx::PgPool;
use tracing::{info, instrument};

use crate::dtos::product::{
    CreateProductRequest, ProductListResponse, ProductResponse, UpdateProductRequest,
};
use crate::error::AppError;
use crate::models::product::NewProduct;
use crate::repository::product::PgProductRepository;
use crate::repository::session::DbSession;
use crate::repository::unit_of_work::PgUnitOfWork;
use crate::repository::{ProductRepository, UnitOfWork};

/// Orchestrates repository and unit-of-work calls for the product resource:
/// existence checks, partial-update merges, timestamp stamping, DTO mapping.
/// Every mutating operation commits the unit of work exactly once.
pub struct ProductService {
    repository: Arc<dyn ProductRepository>,
    unit_of_work: Arc<dyn UnitOfWork>,
}

impl ProductService {
    pub fn new(repository: Arc<dyn ProductRepository>, unit_of_work: Arc<dyn UnitOfWork>) -> Self {
        Self {
            repository,
            unit_of_work,
        }
    }

    // Production wiring: one session per service instance, shared by the
    // repository and the unit of work
    pub fn postgres(pool: PgPool) -> Self {
        let session = Arc::new(DbSession::new(pool));
        Self::new(
            Arc::new(PgProductRepository::new(session.clone())),
            Arc::new(PgUnitOfWork::new(session)),
        )
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i64) -> Result<ProductResponse, AppError> {
        let product = self
            .repository
            .get_by_id(id, true)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product with ID {id} not found.")))?;
        Ok(ProductResponse::from(product))
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        page_number: i64,
        page_size: i64,
        search_term: Option<&str>,
    ) -> Result<ProductListResponse, AppError> {
        let started = Instant::now();

        let products = self
            .repository
            .get_all(page_number, page_size, search_term)
            .await?;
        let total_count = self.repository.total_count(search_term).await?;

        info!(
            count = products.len(),
            total_count,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "products listed"
        );

        Ok(ProductListResponse {
            products: products.into_iter().map(ProductResponse::from).collect(),
            total_count,
            page_number,
            page_size,
        })
    }

    #[instrument(skip(self, request))]
    pub async fn create(&self, request: CreateProductRequest) -> Result<ProductResponse, AppError> {
        let started = Instant::now();

        let created = self
            .repository
            .add(NewProduct {
                product_name: request.product_name,
                created_by: request.created_by,
                created_on: Utc::now(),
            })
            .await?;
        self.unit_of_work.save_changes().await?;

        info!(
            product_id = created.id,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "product created"
        );
        Ok(ProductResponse::from(created))
    }

    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        id: i64,
        request: UpdateProductRequest,
    ) -> Result<ProductResponse, AppError> {
        let started = Instant::now();

        let mut product = self
            .repository
            .get_by_id(id, true)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product with ID {id} not found.")))?;

        // Merge only the fields present on the request
        if let Some(product_name) = request.product_name {
            product.product_name = product_name;
        }
        if let Some(modified_by) = request.modified_by {
            product.modified_by = Some(modified_by);
        }
        // modified_on is refreshed on every update, whatever fields came in
        product.modified_on = Some(Utc::now());

        self.repository.update(&product).await?;
        self.unit_of_work.save_changes().await?;

        info!(
            product_id = id,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "product updated"
        );
        Ok(ProductResponse::from(product))
    }

    // A missing id is a valid outcome here, not an error
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let started = Instant::now();

        let Some(product) = self.repository.get_by_id(id, false).await? else {
            return Ok(false);
        };

        self.repository.delete(&product).await?;
        self.unit_of_work.save_changes().await?;

        info!(
            product_id = id,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "product deleted"
        );
        Ok(true)
    }

    pub async fn exists(&self, id: i64) -> Result<bool, AppError> {
        self.repository.exists(id).await
    }
}
