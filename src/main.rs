//! devlock server - Entry Point
//!
//! Account registration and device-locked login over JSON/HTTP.

use log::{error, info};
use std::process::ExitCode;

use devlock_server::utils::logging::setup_logging;
use devlock_server::{Server, ServerConfig};

#[tokio::main]
async fn main() -> ExitCode {
    setup_logging();

    info!("Launching devlock server...");

    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let server = match Server::new(config).await {
        Ok(server) => server,
        Err(e) => {
            error!("Server startup failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = server.start().await {
        error!("Server terminated with error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
