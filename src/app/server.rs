use crate::adapters::{RemoteChartEngine, StaticChartEngine};
use crate::app::http;
use crate::config::toml_config::AppConfig;
use crate::core::engine::HdTypeEngine;
use crate::domain::ports::ChartEngine;
use crate::utils::error::{HdError, Result};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;

/// 依 `chart.mode` 建立星盤計算服務
pub fn build_chart_engine(config: &AppConfig) -> Result<Arc<dyn ChartEngine>> {
    if config.is_static_chart() {
        tracing::warn!(
            "⚠️ Static chart engine enabled, every request returns '{}'",
            config.chart.static_type
        );
        return Ok(Arc::new(StaticChartEngine::new(config.chart.static_type.clone())));
    }

    let engine = RemoteChartEngine::from_config(config)?;
    tracing::info!(
        "🔭 Remote chart engine at {} (ephemeris: {}, timeout: {}s)",
        engine.endpoint(),
        config.chart.ephemeris,
        config.chart.timeout_seconds
    );
    Ok(Arc::new(engine))
}

pub fn build_router(config: &AppConfig) -> Result<Router> {
    let chart = build_chart_engine(config)?;
    http::router(HdTypeEngine::new(chart), &config.cors)
}

pub async fn serve(config: &AppConfig) -> Result<()> {
    let router = build_router(config)?;

    let address = config.bind_address();
    let listener = TcpListener::bind(&address).await.map_err(|e| {
        tracing::error!("Failed to bind to address {}: {}", address, e);
        HdError::IoError(e)
    })?;

    match listener.local_addr() {
        Ok(address) => tracing::info!("🚀 Listening on {}", address),
        Err(error) => tracing::warn!(%error, "Could not determine local address"),
    }

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// SIGINT (Ctrl+C) 或 SIGTERM 時結束
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::warn!(%error, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C, initiating graceful shutdown"),
        () = terminate => tracing::info!("Received SIGTERM, initiating graceful shutdown"),
    }
}
