//! Server startup utilities.

use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
   _____ _ _            _       _
  / ____| (_)          | |     | |
 | |    | |_  ___ _ __ | |_ ___| | ___
 | |    | | |/ _ \ '_ \| __/ _ \ |/ _ \
 | |____| | |  __/ | | | ||  __/ |  __/
  \_____|_|_|\___|_| |_|\__\___|_|\___|
    "#);
}

/// Prints server startup information.
pub fn print_startup_info(addr: &str, swagger_enabled: bool) {
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("REST API:  http://{}/api/v1/customers", addr);
    info!("Health:    http://{}/health", addr);
    info!("Monitor:   http://{}/monitor", addr);
    if swagger_enabled {
        info!("API Docs:  http://{}/swagger-ui", addr);
    }
    info!("{}", separator);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_banner_does_not_panic() {
        let _ = tracing_subscriber::fmt::try_init();
        print_banner();
    }

    #[test]
    fn test_print_startup_info_does_not_panic() {
        let _ = tracing_subscriber::fmt::try_init();
        print_startup_info("0.0.0.0:8080", true);
        print_startup_info("127.0.0.1:3000", false);
    }
}
