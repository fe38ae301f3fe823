use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tokio::signal;
use tower_http::trace::TraceLayer;

use crate::{api, config::Config, DbPool};

// Requests carry a single identifier; anything larger is not a valid request.
pub(crate) const MAX_BODY_SIZE: usize = 64 * 1024;

pub fn app(pool: DbPool) -> Router {
    Router::new()
        .route("/health", get(api::health_handler))
        .nest(
            "/analyze",
            Router::new()
                .route("/peak-hours", post(api::analyze::peak_hours))
                .route("/hourly", post(api::analyze::hourly))
                .route("/booking-trends", post(api::analyze::booking_trends))
                .route("/earnings", post(api::analyze::earnings))
                .route("/summary", post(api::analyze::summary))
                .route("/sports", post(api::analyze::sports)),
        )
        .with_state(pool)
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .layer(TraceLayer::new_for_http())
}

pub async fn run(pool: DbPool, config: Config, port: u16) -> anyhow::Result<()> {
    api::health::init_start_time();

    let ip = config
        .bind_address
        .parse::<std::net::IpAddr>()
        .map_err(|e| anyhow::anyhow!("invalid BIND_ADDRESS {}: {}", config.bind_address, e))?;
    let addr = SocketAddr::new(ip, port);
    tracing::info!("Court analytics server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app(pool))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown...");
        }
    }
}
