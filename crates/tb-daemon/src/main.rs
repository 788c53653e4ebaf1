//! `tb-daemon` entry point. Thin by design, matching
//! `mqk-daemon/src/main.rs`: load env, init tracing, build shared state,
//! spawn the outbox publisher, serve the HTTP gateway with graceful
//! shutdown.

use std::sync::Arc;

use anyhow::Context;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{info, Level};

use tb_daemon::{publisher, routes, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    init_tracing();

    let cfg = tb_config::Config::from_env().context("load configuration")?;
    let http_addr = cfg.http_addr.clone();
    let state = AppState::build(cfg).await.context("build application state")?;

    publisher::spawn(
        state.tx.clone(),
        Arc::clone(&state.outbox_producer),
        state.cfg.bus.outbox_topic.clone(),
        state.cfg.outbox.poll_interval,
        state.cfg.outbox.batch_size,
    );

    let app = routes::build_router(Arc::clone(&state)).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    let listener = tokio::net::TcpListener::bind(&http_addr).await?;
    info!("tb-daemon listening on http://{}", http_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server crashed")?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received, draining in-flight requests");
}
