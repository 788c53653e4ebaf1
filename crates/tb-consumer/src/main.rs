//! `tb-consumer` entry point: the downstream notification consumer.
//! Mirrors the shape of `original_source/notification-service`'s process —
//! one reader per configured topic, each running fetch→handle→commit — with
//! `tb-bus::BusConsumer` supplying the transport and `tb-consumer-lib`'s
//! `NotificationRouter` supplying the application logic.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use tb_bus::{BusConsumer, Producer};
use tb_consumer_lib::{LoggingNotifier, NotificationRouter};
use tb_db::TxManager;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    init_tracing();

    let cfg = tb_config::Config::from_env().context("load configuration")?;

    let pool = tb_db::connect(&cfg.postgres).await.context("connect to postgres")?;
    tb_db::migrate(&pool).await.context("run migrations")?;
    let tx = TxManager::new(pool);

    let dlq_producer = Producer::new(&cfg.bus.brokers, &cfg.bus.acks).context("create dlq producer")?;
    let notifier = Arc::new(LoggingNotifier);
    let router = Arc::new(NotificationRouter::new(tx, notifier, dlq_producer, cfg.dlq.topic.clone()));

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

    let consumer = BusConsumer::new(cfg.bus.brokers.clone(), cfg.bus.group_id.clone());
    let handles = consumer.spawn_all(vec![cfg.bus.outbox_topic.clone()], router, shutdown_rx);

    info!(topic = %cfg.bus.outbox_topic, group_id = %cfg.bus.group_id, "tb-consumer subscribed");

    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received");
    let _ = shutdown_tx.send(true);

    for handle in handles {
        let _ = handle.await;
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
}
