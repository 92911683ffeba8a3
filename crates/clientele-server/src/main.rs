//! # Clientele Server
//!
//! Main entry point for the Clientele customer service.

use clientele_config::{ConfigLoader, ObservabilityConfig};
use clientele_server::{logging::init_logging, run, startup};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let loader = match ConfigLoader::from_default_location() {
        Ok(loader) => loader,
        Err(e) => {
            init_logging(&ObservabilityConfig::default());
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    let config = loader.get();

    init_logging(&config.observability);
    startup::print_banner();

    info!("Starting Clientele Server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(config).await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}
