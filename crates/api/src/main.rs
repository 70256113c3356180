//! E2E pet-store fixture API.
//!
//! A small HTTP server used to validate API clients under test: seeded
//! in-memory records, a pair of shared-secret auth schemes on the mutating
//! routes, and an `OpenAPI` document served in 3.0.3 conventions (downgraded
//! from the 3.1-style tree it is generated in).

mod auth;
mod error;
mod openapi;
mod routes;
mod store;

use anyhow::Context as _;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "petfix-api", about = "E2E pet-store fixture API", version)]
struct Cli {
    /// Socket address to bind.
    #[arg(long, default_value = "127.0.0.1:8080")]
    bind: SocketAddr,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Bearer token accepted on protected routes.
    #[arg(long, env = "PETFIX_BEARER_TOKEN", default_value = auth::DEFAULT_BEARER_TOKEN)]
    bearer_token: String,

    /// API key accepted on protected routes.
    #[arg(long, env = "PETFIX_API_KEY", default_value = auth::DEFAULT_API_KEY)]
    api_key: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .init();

    let secrets = auth::AuthSecrets {
        bearer_token: cli.bearer_token,
        api_key: cli.api_key,
    };
    let state = Arc::new(routes::FixtureState::new(secrets));
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(cli.bind)
        .await
        .with_context(|| format!("bind {}", cli.bind))?;
    tracing::info!("petfix-api listening on {}", cli.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serve")?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutting down");
}
