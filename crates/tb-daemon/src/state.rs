//! Shared runtime state for `tb-daemon`. Cloneable (`Arc`) handle passed to
//! every Axum handler, matching `mqk-daemon/src/state.rs`'s `AppState`
//! shape — here wired to the real collaborators instead of placeholders.

use std::sync::Arc;

use tb_bus::Producer;
use tb_cache::BoardCache;
use tb_config::Config;
use tb_db::TxManager;
use tb_rpc::{AuthService, BoardsService, ColumnsService, TasksService};
use tb_usecases::{AuthUseCases, BoardUseCases, ColumnUseCases, TaskUseCases};

pub struct AppState {
    pub boards: BoardsService,
    pub columns: ColumnsService,
    pub tasks: TasksService,
    pub auth: AuthService,
    pub tx: TxManager,
    pub outbox_producer: Arc<Producer>,
    pub cfg: Config,
}

async fn connect_cache(cfg: &Config) -> anyhow::Result<Option<BoardCache>> {
    let client = redis::Client::open(cfg.redis.addr.clone())?;
    match redis::aio::ConnectionManager::new(client).await {
        Ok(conn) => Ok(Some(BoardCache::new(conn))),
        Err(err) => {
            tracing::warn!(%err, "board cache unavailable at startup, continuing cache-less");
            Ok(None)
        }
    }
}

impl AppState {
    pub async fn build(cfg: Config) -> anyhow::Result<Arc<Self>> {
        let pool = tb_db::connect(&cfg.postgres).await?;
        let tx = TxManager::new(pool);
        let cache = connect_cache(&cfg).await?;

        let boards = BoardsService::new(
            BoardUseCases::new(tx.clone(), cache.clone()),
            cfg.redis.cache_ttl.as_secs(),
        );
        let columns = ColumnsService::new(ColumnUseCases::new(tx.clone(), cache.clone()));
        let tasks = TasksService::new(TaskUseCases::new(tx.clone(), cache.clone()));
        let auth = AuthService::new(AuthUseCases::new(tx.clone(), cfg.jwt.clone()));

        let outbox_producer = Arc::new(Producer::new(&cfg.bus.brokers, &cfg.bus.acks)?);

        Ok(Arc::new(Self {
            boards,
            columns,
            tasks,
            auth,
            tx,
            outbox_producer,
            cfg,
        }))
    }
}
