mod config;
mod error;
mod handlers;
mod middleware;
mod models;
mod routes;
mod state;
mod utils;

use config::Config;
use error::StartupError;
use routes::{create_app, ENDPOINTS};
use state::AppState;
use axum::{extract::Request, ServiceExt};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = Config::load()?;
    init_tracing(&config);

    tracing::info!(
        environment = %config.environment,
        production = config.is_production(),
        ready = config.ready,
        expose_error_stack = config.expose_error_stack,
        "Loaded configuration"
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    let app = create_app(AppState::new(config));

    tracing::info!("DevOps status API listening on {}", listener.local_addr()?);
    tracing::info!("API endpoints:");
    for endpoint in ENDPOINTS {
        tracing::info!("  {}", endpoint);
    }

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
