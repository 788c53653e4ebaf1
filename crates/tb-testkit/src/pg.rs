//! Postgres test fixture. Mirrors `mqk-testkit`'s reliance on a real
//! database rather than a mocked pool — repository tests exercise actual
//! SQL (`FOR UPDATE SKIP LOCKED`, unique-constraint conflicts) that an
//! in-memory fake can't reproduce faithfully.

use sqlx::PgPool;

use tb_db::TxManager;

/// Connect to `TB_TEST_DATABASE_URL` (falling back to `TB_POSTGRES_DSN`) and
/// run migrations. Panics with a clear message if neither is set — callers
/// are integration tests that require a real database, not unit tests.
pub async fn test_pool() -> PgPool {
    let dsn = std::env::var("TB_TEST_DATABASE_URL")
        .or_else(|_| std::env::var("TB_POSTGRES_DSN"))
        .expect("set TB_TEST_DATABASE_URL (or TB_POSTGRES_DSN) to run tb-testkit's database-backed tests");
    let pool = PgPool::connect(&dsn)
        .await
        .expect("connect to test database");
    tb_db::migrate(&pool).await.expect("run migrations against test database");
    pool
}

pub async fn test_tx_manager() -> TxManager {
    TxManager::new(test_pool().await)
}
