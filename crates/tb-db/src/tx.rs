//! Transaction manager (C3 `TxManager` contract) and the `RequestCtx` that
//! threads the active executor through repository calls.
//!
//! Go's original carries the transaction handle as an ambient value on
//! `context.Context`, looked up by the repository without the caller naming
//! it explicitly. Rust has no equivalent of an ambient per-task value map
//! that crosses `.await` points safely, so this is resolved (DESIGN.md,
//! "Context propagation") by an explicit `RequestCtx` value passed by
//! argument, exactly as `original_source/.../tx_manager.go`'s `InTx`/`DB`
//! pair specifies, just made explicit rather than implicit.

use std::future::Future;
use std::sync::Arc;

use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::{Query, QueryAs};
use sqlx::{PgPool, Postgres, Transaction};
use tokio::sync::Mutex;

use tb_domain::DomainError;

use crate::error::map_sqlx_err;

#[derive(Clone)]
enum ExecHandle {
    Pool(PgPool),
    Tx(Arc<Mutex<Transaction<'static, Postgres>>>),
}

/// The context threaded through every repository call: which executor to
/// use (pool or the caller's open transaction).
#[derive(Clone)]
pub struct RequestCtx {
    exec: ExecHandle,
}

impl RequestCtx {
    /// A fresh, non-transactional context backed directly by the pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            exec: ExecHandle::Pool(pool),
        }
    }

    fn in_transaction(&self) -> bool {
        matches!(self.exec, ExecHandle::Tx(_))
    }

    /// Run a bound, non-row-returning statement against the active executor.
    pub async fn execute(&self, query: Query<'_, Postgres, PgArguments>) -> Result<u64, DomainError> {
        let res = match &self.exec {
            ExecHandle::Pool(pool) => query.execute(pool).await,
            ExecHandle::Tx(tx) => {
                let mut guard = tx.lock().await;
                query.execute(&mut **guard).await
            }
        };
        res.map(|r| r.rows_affected()).map_err(map_sqlx_err)
    }

    pub async fn fetch_all<O>(&self, query: QueryAs<'_, Postgres, O, PgArguments>) -> Result<Vec<O>, DomainError>
    where
        O: for<'r> sqlx::FromRow<'r, PgRow> + Send + Unpin,
    {
        let res = match &self.exec {
            ExecHandle::Pool(pool) => query.fetch_all(pool).await,
            ExecHandle::Tx(tx) => {
                let mut guard = tx.lock().await;
                query.fetch_all(&mut **guard).await
            }
        };
        res.map_err(map_sqlx_err)
    }

    /// Like `fetch_all`, but for queries whose result columns are consumed
    /// directly via `Row::try_get` rather than a derived `FromRow` — needed
    /// for the outbox fetch query, whose column list is assembled by hand
    /// rather than mapped onto a struct at the query-builder level.
    pub async fn fetch_all_raw(&self, query: Query<'_, Postgres, PgArguments>) -> Result<Vec<PgRow>, DomainError> {
        let res = match &self.exec {
            ExecHandle::Pool(pool) => query.fetch_all(pool).await,
            ExecHandle::Tx(tx) => {
                let mut guard = tx.lock().await;
                query.fetch_all(&mut **guard).await
            }
        };
        res.map_err(map_sqlx_err)
    }

    pub async fn fetch_optional<O>(
        &self,
        query: QueryAs<'_, Postgres, O, PgArguments>,
    ) -> Result<Option<O>, DomainError>
    where
        O: for<'r> sqlx::FromRow<'r, PgRow> + Send + Unpin,
    {
        let res = match &self.exec {
            ExecHandle::Pool(pool) => query.fetch_optional(pool).await,
            ExecHandle::Tx(tx) => {
                let mut guard = tx.lock().await;
                query.fetch_optional(&mut **guard).await
            }
        };
        res.map_err(map_sqlx_err)
    }
}

/// Owns the connection pool; hands out transaction-scoped `RequestCtx`
/// values via `in_tx`.
#[derive(Clone)]
pub struct TxManager {
    pool: PgPool,
}

impl TxManager {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn root_ctx(&self) -> RequestCtx {
        RequestCtx::new(self.pool.clone())
    }

    /// If `ctx` already carries a transaction handle, `f` runs inside it —
    /// nested-call-safe, no new transaction is opened. Otherwise opens a new
    /// transaction, commits on `Ok`, rolls back on `Err`.
    pub async fn in_tx<F, Fut, T>(&self, ctx: &RequestCtx, f: F) -> Result<T, DomainError>
    where
        F: FnOnce(RequestCtx) -> Fut,
        Fut: Future<Output = Result<T, DomainError>>,
    {
        if ctx.in_transaction() {
            return f(ctx.clone()).await;
        }

        let tx = self.pool.begin().await.map_err(map_sqlx_err)?;
        let handle = Arc::new(Mutex::new(tx));
        let nested = RequestCtx {
            exec: ExecHandle::Tx(handle.clone()),
        };

        let result = f(nested).await;

        // `f` has returned, so the only remaining strong reference is ours —
        // any clone of `nested` retained beyond the closure call would be a
        // programming error in the caller, not a condition we try to recover
        // from here.
        let tx = match Arc::try_unwrap(handle) {
            Ok(mutex) => mutex.into_inner(),
            Err(_) => {
                return Err(DomainError::Internal(
                    "transaction handle escaped its in_tx scope".into(),
                ))
            }
        };

        match result {
            Ok(value) => {
                tx.commit().await.map_err(map_sqlx_err)?;
                Ok(value)
            }
            Err(e) => {
                let _ = tx.rollback().await;
                Err(e)
            }
        }
    }
}
