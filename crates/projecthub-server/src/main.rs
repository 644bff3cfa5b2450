//! CLI entry point for the ProjectHub API server.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use projecthub_core::config::AppConfig;
use projecthub_graphql::{build_schema, export_sdl};
use projecthub_server::router;
use projecthub_store::{open_store, MemoryStore};

#[derive(Parser)]
#[command(name = "projecthub-server")]
#[command(about = "GraphQL API for clients and their projects")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Config file prefix (default: projecthub).
    #[arg(short, long, default_value = "projecthub", global = true)]
    config: String,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the API over HTTP (default).
    Serve,
    /// Print the schema in SDL form and exit.
    Schema,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).json().init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&cli.config).await,
        Command::Schema => {
            // The SDL does not depend on stored data.
            let schema = build_schema(Arc::new(MemoryStore::new()));
            println!("{}", export_sdl(&schema));
            Ok(())
        }
    }
}

async fn serve(config_prefix: &str) -> anyhow::Result<()> {
    let config = AppConfig::load(config_prefix)?;
    let store = open_store(&config.store).await?;
    let schema = build_schema(store);
    let app = router(schema, config.server.playground);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        addr = %addr,
        backend = ?config.store.backend,
        playground = config.server.playground,
        "Server running"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
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
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
