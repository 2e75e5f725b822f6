// src/repository/session.rs
use sqlx::{PgPool, Postgres, Transaction};
use tokio::sync::{Mutex, MutexGuard};

use crate::error::AppError;

/// Per-request database session shared by the repository and the unit of
/// work. Reads go straight to the pool; writes run on a transaction that is
/// opened lazily on the first mutation and committed by the unit of work.
pub struct DbSession {
    pool: PgPool,
    state: Mutex<SessionState>,
}

#[derive(Default)]
pub(crate) struct SessionState {
    pub(crate) tx: Option<Transaction<'static, Postgres>>,
    explicit: bool,
    pub(crate) pending: u64,
}

impl SessionState {
    pub(crate) async fn ensure_tx(&mut self, pool: &PgPool) -> Result<(), sqlx::Error> {
        if self.tx.is_none() {
            self.tx = Some(pool.begin().await?);
        }
        Ok(())
    }

    pub(crate) fn tx_mut(&mut self) -> Result<&mut Transaction<'static, Postgres>, AppError> {
        self.tx
            .as_mut()
            .ok_or_else(|| AppError::internal("no open session transaction"))
    }
}

impl DbSession {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            state: Mutex::new(SessionState::default()),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub(crate) async fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().await
    }

    /// Commits the implicit transaction (if any) and reports the number of
    /// mutations flushed since the last save. Under an explicit transaction
    /// the commit is left to `commit_transaction`.
    pub async fn save_changes(&self) -> Result<u64, AppError> {
        let mut state = self.state.lock().await;
        let pending = state.pending;
        state.pending = 0;
        if !state.explicit {
            if let Some(tx) = state.tx.take() {
                tx.commit().await?;
            }
        }
        Ok(pending)
    }

    pub async fn begin_transaction(&self) -> Result<(), AppError> {
        let mut state = self.state.lock().await;
        if state.tx.is_some() {
            return Err(AppError::internal(
                "a transaction is already open on this session",
            ));
        }
        state.tx = Some(self.pool.begin().await?);
        state.explicit = true;
        Ok(())
    }

    pub async fn commit_transaction(&self) -> Result<(), AppError> {
        let mut state = self.state.lock().await;
        match state.tx.take() {
            Some(tx) => {
                tx.commit().await?;
                state.explicit = false;
                state.pending = 0;
                Ok(())
            }
            None => Err(AppError::internal("no open transaction to commit")),
        }
    }

    pub async fn rollback_transaction(&self) -> Result<(), AppError> {
        let mut state = self.state.lock().await;
        match state.tx.take() {
            Some(tx) => {
                tx.rollback().await?;
                state.explicit = false;
                state.pending = 0;
                Ok(())
            }
            None => Err(AppError::internal("no open transaction to roll back")),
        }
    }
}
