use std::sync::Arc;

use anyhow::{anyhow, Context};
use clap::Parser;
use log::{info, warn};
use menagerie_core::{core_version, init_logging, ConnectOptions, ConnectionStatus, Gateway};
use menagerie_server::{build_app, AppState, ServerConfig};
use tokio::net::TcpListener;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level, config.log_dir.as_deref())
        .map_err(|err| anyhow!("logging init failed: {err}"))?;

    // A failed connection is logged and surfaces as 503 per request.
    let gateway = Arc::new(Gateway::connect(
        &config.database_url,
        &ConnectOptions::default(),
    ));
    if gateway.status() != ConnectionStatus::Open {
        warn!("event=server_start module=server status=degraded reason=store_unavailable");
    }

    let app = build_app(
        AppState::new(Arc::clone(&gateway)),
        &config.static_dir,
        config.home,
    );

    let addr = config.listen_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(
        "event=server_listen module=server status=ok addr={addr} version={}",
        core_version()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    gateway.close();
    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!("event=server_signal module=server status=error error={err}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                warn!("event=server_signal module=server status=error error={err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("event=server_shutdown module=server status=ok");
}
