//! Postgres-backed storage (C3/C4). Connection setup and migrations follow
//! `mqk-db/src/lib.rs`'s `connect_from_env`/`migrate` pair; per-aggregate
//! repositories and the outbox store are this crate's new content.

pub mod boards;
pub mod columns;
pub mod error;
pub mod notifications;
pub mod outbox;
pub mod tasks;
pub mod tx;
pub mod users;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tb_config::PostgresConfig;

pub use tx::{RequestCtx, TxManager};

/// Open a connection pool per `cfg`, mirroring `mqk-db`'s
/// `connect_from_env`'s bounded-pool construction.
pub async fn connect(cfg: &PostgresConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .min_connections(cfg.min_conns)
        .max_connections(cfg.max_conns)
        .idle_timeout(Some(cfg.idle_timeout))
        .max_lifetime(Some(cfg.max_lifetime))
        .connect(&cfg.dsn)
        .await
}

/// Run the crate's bundled migrations. Exposed separately from `connect` so
/// the CLI's `migrate` subcommand can invoke it against a pool that the
/// daemon never opens on its own (same separation as `mqk-cli`'s `migrate`
/// command versus `mqk-daemon`'s own startup, which assumes migrations were
/// already applied).
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
