//! Sigil node - single-sign-on credential service.
//!
//! Loads configuration, provisions app records, wires the authentication
//! engine, and serves the HTTP API until SIGINT/SIGTERM.

use clap::Parser;
use sigil_auth::{AuthEngine, CredentialHasher, SystemClock, TokenIssuer};
use sigil_node::api::{create_router, AppState};
use sigil_node::config::Config;
use sigil_node::observability::{init_logging, LogFormat};
use sigil_storage::MemoryAccountStore;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Sigil SSO node
#[derive(Parser, Debug)]
#[command(name = "sigil-node")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// API listen address (overrides config)
    #[arg(long)]
    listen_addr: Option<String>,

    /// Log level (overrides config)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = if args.config.exists() {
        Config::load(&args.config)?
    } else {
        Config::default()
    };
    if let Some(addr) = args.listen_addr {
        config.listen_addr = addr;
    }
    if let Some(level) = args.log_level {
        config.log_level = level;
    }

    init_logging(&config.log_level, LogFormat::parse(&config.log_format));

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting sigil node");

    let store = Arc::new(MemoryAccountStore::new());
    for app in &config.apps {
        store.provision_app(app.clone().into());
    }
    if store.app_count() == 0 {
        tracing::warn!("no apps provisioned; every login will fail with app not found");
    }
    tracing::info!(apps = store.app_count(), "account store initialized");

    let engine = AuthEngine::new(
        store,
        CredentialHasher::new(config.hasher)?,
        TokenIssuer::new(Arc::new(SystemClock)),
        Duration::from_secs(config.token_ttl_secs),
    );

    let router = create_router(AppState { engine });

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("gracefully stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
