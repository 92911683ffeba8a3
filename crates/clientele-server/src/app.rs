//! Server run loop.

use crate::{context::AppContext, startup};
use clientele_config::AppConfig;
use clientele_core::{ClienteleError, ClienteleResult};
use clientele_rest::create_router;
use tokio::signal;
use tracing::{info, warn};

/// Builds the application, serves HTTP until a shutdown signal arrives,
/// then stops the monitors and closes the database pool.
pub async fn run(config: AppConfig) -> ClienteleResult<()> {
    info!("Environment: {}", config.app.environment);

    let context = AppContext::build(config).await;
    let server_config = context.config().server.clone();
    let router = create_router(context.app_state(), &server_config);

    let addr = server_config.addr();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            context.shutdown().await;
            return Err(ClienteleError::Internal(format!("Failed to bind {addr}: {e}")));
        }
    };

    startup::print_startup_info(&addr, server_config.swagger_enabled);
    info!("Starting REST server on http://{}", addr);

    let served = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    context.shutdown().await;

    served.map_err(|e| ClienteleError::Internal(format!("REST server error: {e}")))?;
    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
