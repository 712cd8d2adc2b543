//! HTTP API
//!
//! - `POST /extract-invoice`：multipart 上傳發票，回傳擷取結果
//! - `GET /health`：存活檢查

pub mod error;
pub mod routes;
pub mod state;

use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::toml_config::ServiceConfig;
use crate::utils::error::Result;
use state::AppState;

/// 組出完整的 router（含上傳大小限制、逾時與請求追蹤）
pub fn build_router(state: AppState, max_upload_bytes: usize, request_timeout: Duration) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::invoice::router())
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 依設定啟動服務，直到收到 SIGINT / SIGTERM
pub async fn serve(config: &ServiceConfig) -> Result<()> {
    let state = AppState::new(config.build_processor(), config.server.max_concurrent_jobs);
    let app = build_router(
        state,
        config.max_upload_bytes(),
        Duration::from_secs(config.server.request_timeout_seconds),
    );

    let addr = config.bind_address()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        "🚀 Listening on {} (max {} concurrent job(s))",
        listener.local_addr()?,
        config.server.max_concurrent_jobs
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl-C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
