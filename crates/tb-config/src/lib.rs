//! Environment-driven configuration (C11).
//!
//! Grounded in `mqk-daemon/src/main.rs`'s own startup idiom — it
//! loads `.env.local` via `dotenvy` and wraps every fallible step in
//! `anyhow::Context` — rather than `mqk-config`'s layered-YAML/canonical-hash
//! mechanism, which exists there to give reproducible backtests a lineage
//! hash and has no counterpart in a request-serving web service. The flat
//! env-var shape instead matches
//! `original_source/notification-service/internal/config/config.go`.
//!
//! Missing or unparseable required values fail `Config::from_env` before any
//! resource (pool, cache client, bus producer) is opened.

use anyhow::{Context, Result};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub dsn: String,
    pub min_conns: u32,
    pub max_conns: u32,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub addr: String,
    pub db: i64,
    pub password: Option<String>,
    pub cache_ttl: Duration,
}

#[derive(Debug, Clone)]
pub struct BusConfig {
    pub brokers: String,
    pub acks: String,
    pub outbox_topic: String,
    pub group_id: String,
}

#[derive(Debug, Clone)]
pub struct OutboxConfig {
    pub poll_interval: Duration,
    pub batch_size: i64,
}

#[derive(Debug, Clone)]
pub struct DlqConfig {
    pub enabled: bool,
    pub topic: String,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_ttl: Duration,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub http_addr: String,
    pub request_timeout: Duration,
    pub shutdown_timeout: Duration,
    pub postgres: PostgresConfig,
    pub redis: RedisConfig,
    pub bus: BusConfig,
    pub outbox: OutboxConfig,
    pub dlq: DlqConfig,
    pub jwt: JwtConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            log_level: env_or("TB_LOG_LEVEL", "info"),
            http_addr: env_or("TB_HTTP_ADDR", "127.0.0.1:8080"),
            request_timeout: Duration::from_secs(env_parse_or("TB_REQUEST_TIMEOUT_SECS", 5)?),
            shutdown_timeout: Duration::from_secs(env_parse_or("TB_SHUTDOWN_TIMEOUT_SECS", 10)?),
            postgres: PostgresConfig {
                dsn: env_required("TB_POSTGRES_DSN")?,
                min_conns: env_parse_or("TB_POSTGRES_MIN_CONNS", 1)?,
                max_conns: env_parse_or("TB_POSTGRES_MAX_CONNS", 10)?,
                idle_timeout: Duration::from_secs(env_parse_or("TB_POSTGRES_IDLE_TIMEOUT_SECS", 300)?),
                max_lifetime: Duration::from_secs(env_parse_or("TB_POSTGRES_MAX_LIFETIME_SECS", 1800)?),
            },
            redis: RedisConfig {
                addr: env_or("TB_REDIS_ADDR", "redis://127.0.0.1:6379"),
                db: env_parse_or("TB_REDIS_DB", 0)?,
                password: env_optional("TB_REDIS_PASSWORD"),
                cache_ttl: Duration::from_secs(env_parse_or("TB_CACHE_TTL_SECS", 30)?),
            },
            bus: BusConfig {
                brokers: env_required("TB_BUS_BROKERS")?,
                acks: env_or("TB_BUS_ACKS", "all"),
                outbox_topic: env_or("TB_BUS_OUTBOX_TOPIC", "task-board.outbox"),
                group_id: env_or("TB_BUS_GROUP_ID", "task-board-consumer"),
            },
            outbox: OutboxConfig {
                poll_interval: Duration::from_secs(env_parse_or("TB_OUTBOX_POLL_INTERVAL_SECS", 5)?),
                batch_size: env_parse_or("TB_OUTBOX_BATCH_SIZE", 100)?,
            },
            dlq: DlqConfig {
                enabled: env_parse_or("TB_DLQ_ENABLED", true)?,
                topic: env_or("TB_DLQ_TOPIC", "task-board.dlq"),
            },
            jwt: JwtConfig {
                secret: env_required("TB_JWT_SECRET")?,
                access_token_ttl: Duration::from_secs(env_parse_or("TB_JWT_ACCESS_TOKEN_TTL_SECS", 24 * 3600)?),
            },
        })
    }
}

fn env_required(name: &str) -> Result<String> {
    std::env::var(name).with_context(|| format!("missing required env var {name}"))
}

fn env_optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid value for {name}: {e}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Env var mutation is process-global; serialise tests that touch it.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn from_env_fails_fast_when_required_dsn_missing() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::remove_var("TB_POSTGRES_DSN");
        std::env::remove_var("TB_BUS_BROKERS");
        std::env::remove_var("TB_JWT_SECRET");
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("TB_POSTGRES_DSN"));
    }

    #[test]
    fn from_env_applies_defaults_for_optional_fields() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("TB_POSTGRES_DSN", "postgres://localhost/tb");
        std::env::set_var("TB_BUS_BROKERS", "localhost:9092");
        std::env::set_var("TB_JWT_SECRET", "test-secret");
        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.http_addr, "127.0.0.1:8080");
        assert_eq!(cfg.outbox.poll_interval, Duration::from_secs(5));
        assert!(cfg.dlq.enabled);
        std::env::remove_var("TB_POSTGRES_DSN");
        std::env::remove_var("TB_BUS_BROKERS");
        std::env::remove_var("TB_JWT_SECRET");
    }
}
