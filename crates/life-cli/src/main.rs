//! Terminal Game of Life runner.

mod application;
mod telemetry;

use application::Application;
use life_core::{AppConfig, Error, Result};
use life_world::World;
use std::process::ExitCode;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = telemetry::init_telemetry() {
        eprintln!("Failed to initialize telemetry: {e}");
        return ExitCode::FAILURE;
    }

    // Load configuration
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!(
        "Starting Game of Life on a {}x{} torus",
        config.height, config.width
    );

    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        signal_token.cancel();
    });

    let app = Application::new(config);
    let result = app.run(cancel, &mut std::io::stdout()).await;
    ExitCode::from(exit_code(&result))
}

/// Map the outcome of a run to a process exit status, logging why it ended.
fn exit_code(result: &Result<World>) -> u8 {
    match result {
        Ok(world) => {
            info!(population = world.population(), "Simulation finished");
            0
        }
        Err(Error::Cancelled) => {
            info!("Processing cancelled");
            1
        }
        Err(e) => {
            error!("Application run error: {}", e);
            1
        }
    }
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
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
