//! # stockboard
//!
//! HTTP front end for the stock dashboard. Each page request is resolved
//! into a form, planned through the shared memoized fetcher, and rendered
//! either as HTML with inline SVG charts (`/`) or as JSON (`/api/dashboard`).

mod config;
mod error;
mod render;
mod routes;
mod state;

use std::process::ExitCode;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::ServerError;
use crate::state::AppState;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run(Config::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!(%error, "stockboard stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> Result<(), ServerError> {
    let addr = config.socket_addr();
    let state = AppState::from_config(&config);
    let app = routes::router(state);

    let listener = TcpListener::bind(addr).await?;
    info!(
        provider = %config.provider,
        timeout_ms = config.timeout_ms,
        "stockboard listening on http://{addr}"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        // Without a signal handler the server runs until killed.
        warn!(%error, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received, stopping");
}
