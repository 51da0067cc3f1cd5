// Jobsheet API - Local Development Server

use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};

use jobsheet_app::{create_app, log_filter, with_http_layers};
use jobsheet_common::config::Config;

/// Same-origin front end served by the local dev server
const LOCAL_ORIGIN: &str = "http://localhost:3000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logging is configured from the loaded config; a config error is
    // reported through the returned error instead.
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&config))
        .pretty()
        .init();

    info!("Starting Jobsheet API local development server");

    info!(
        token_provider = %config.token_provider,
        jobs_provider = %config.jobs_provider,
        "Configuration loaded successfully"
    );
    if !config.cookie_secure {
        warn!("COOKIE_SECURE=false: session cookies will be sent over plain HTTP");
    }

    let app = create_app(&config).map_err(|e| {
        error!("Failed to create application: {}", e);
        e
    })?;

    let cors_origins = config
        .cors_allowed_origins
        .clone()
        .unwrap_or_else(|| LOCAL_ORIGIN.to_string());

    let app = with_http_layers(app, &cors_origins);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    info!("Server starting on http://{}", addr);
    info!("Health check available at http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        },
    }
}
