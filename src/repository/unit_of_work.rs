// src/repository/unit_of_work.rs
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AppError;
use crate::repository::session::DbSession;
use crate::repository::UnitOfWork;

pub struct PgUnitOfWork {
    session: Arc<DbSession>,
}

impl PgUnitOfWork {
    pub fn new(session: Arc<DbSession>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    async fn save_changes(&self) -> Result<u64, AppError> {
        self.session.save_changes().await
    }

    async fn begin_transaction(&self) -> Result<(), AppError> {
        self.session.begin_transaction().await
    }

    async fn commit_transaction(&self) -> Result<(), AppError> {
        self.session.commit_transaction().await
    }

    async fn rollback_transaction(&self) -> Result<(), AppError> {
        self.session.rollback_transaction().await
    }
}
