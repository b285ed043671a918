//! Vaultex ledger service entry point
//!
//! Wires config, logging, PostgreSQL, the HTTP gateway, and the
//! accrual scheduler. Multiple instances may run concurrently: every
//! fund-moving operation is an atomic conditional update in the store,
//! and the accrual batch is keyed per (investment, date).

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use vaultex::config::AppConfig;
use vaultex::db::Database;
use vaultex::gateway::{self, AppState};
use vaultex::investment::AccrualEngine;
use vaultex::logging::init_logging;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let config = AppConfig::load(&env);
    let _log_guard = init_logging(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        git = env!("GIT_HASH"),
        env = %env,
        "Starting vaultex ledger service"
    );

    let db = Arc::new(
        Database::connect(&config.postgres_url)
            .await
            .context("Failed to connect to PostgreSQL")?,
    );
    db.init_schema().await.context("Failed to apply schema")?;

    let accrual = Arc::new(AccrualEngine::with_concurrency(
        db.clone(),
        config.accrual.batch_concurrency,
    ));

    if config.accrual.enabled {
        let scheduler = accrual.clone();
        let accrual_config = config.accrual.clone();
        tokio::spawn(async move {
            scheduler.run_scheduler(accrual_config).await;
        });
        info!(
            interval_secs = config.accrual.check_interval_secs,
            "Accrual scheduler started"
        );
    }

    let state = Arc::new(AppState::new(db, accrual));
    let app = gateway::router(state);

    let addr: SocketAddr = format!("{}:{}", config.gateway.host, config.gateway.port)
        .parse()
        .context("Invalid gateway address")?;
    info!(%addr, "Gateway listening");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind gateway address")?;
    axum::serve(listener, app.into_make_service())
        .await
        .context("Gateway server error")?;

    Ok(())
}
