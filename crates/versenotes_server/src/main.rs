//! `versenotesd` entry point.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::info;
use tokio::net::TcpListener;
use tokio::signal;
use versenotes_core::init_logging;
use versenotes_server::{router, ServerConfig, Store};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::parse();
    init_logging(config.log_level(), config.log_dir.as_deref()).map_err(|err| anyhow!(err))?;

    let allowed_origin = config.allowed_origin_header().map_err(|err| anyhow!(err))?;
    let store = Store::open(config.database_path()).with_context(|| {
        format!(
            "failed to open database `{}`",
            config.database_path().display()
        )
    })?;
    info!(
        "event=store_open module=server status=ok path={}",
        store.path().display()
    );

    let app = router(store, allowed_origin);
    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    info!(
        "event=server_start module=server status=ok addr={} allowed_origin={}",
        config.bind, config.allowed_origin
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    let _ = signal::ctrl_c().await;
    info!("event=shutdown_requested module=server status=ok");
}
