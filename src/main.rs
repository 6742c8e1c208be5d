use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use snmp_monitor::collector::{CollectionLoop, Poller};
use snmp_monitor::snmp::V2cTransport;
use snmp_monitor::{AppConfig, AppState, create_router};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    config.debug_config();

    let connection = &config.settings.connection;
    let transport = Arc::new(V2cTransport::new(
        connection.port,
        config.get_timeout(),
        connection.max_repetitions,
    ));

    let state = AppState::new(transport.clone(), config.clone());
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let collection = &config.settings.collection;
    let collector = if collection.enabled {
        let poller = Arc::new(Poller::new(
            transport,
            state.history.clone(),
            config.devices.clone(),
            collection.resolve_sys_name,
        ));
        let collection_loop = CollectionLoop::new(poller, collection.overlap, config.get_period());
        Some(tokio::spawn(collection_loop.run(shutdown_rx)))
    } else {
        tracing::info!("цикл сбора отключен");
        None
    };

    let bind_addr = config.get_bind_addr();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Не удалось занять адрес {}", bind_addr))?;
    tracing::info!(addr = %bind_addr, "HTTP сервер запущен");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP сервер завершился с ошибкой")?;

    let _ = shutdown_tx.send(true);
    if let Some(handle) = collector {
        let _ = handle.await;
    }
    tracing::info!("сервер остановлен");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "не удалось подписаться на Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("получен Ctrl-C, остановка");
}
