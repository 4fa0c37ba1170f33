mod cli;
mod error;
mod kubernetes;
mod server;
mod types;
mod utils;

use clap::Parser;
use std::sync::Arc;
use tracing::info;

use cli::Cli;
use kubernetes::KubePods;
use server::{AppState, create_app};
use types::GatewayConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let client = kubernetes::connect(cli.context.as_deref()).await?;
    let config = gateway_config(&cli);
    if config.token.is_empty() {
        info!("No token configured, authentication disabled");
    }

    let state = AppState::new(Arc::new(KubePods::new(client)), config);
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(cli.bind).await?;
    info!("Listening on {}", cli.bind);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shut down");
    Ok(())
}

fn gateway_config(cli: &Cli) -> GatewayConfig {
    GatewayConfig {
        token: cli.token.clone(),
        max_lines: cli.max_lines,
        default_lines: cli.default_lines,
        default_namespace: cli.default_namespace.clone(),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    info!("Shutdown signal received");
}
