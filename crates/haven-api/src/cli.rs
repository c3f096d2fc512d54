//! CLI module for haven-api.
//!
//! This module provides the command-line interface that can be used either
//! as a standalone binary or as a subcommand of the unified haven CLI.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter,
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use haven_config::{
    CliOverrides, Config, LoggingConfig, StoreBackend, apply_overrides, load_config,
    validate_config,
};
use haven_core::defaults;
use haven_quota::QuotaLimits;
use haven_store::{MemoryStore, RedisStore};

use crate::routes::router;
use crate::server::serve;
use crate::state::{AppState, SharedStore};

/// Haven API CLI arguments.
#[derive(Parser, Debug, Clone)]
#[command(name = "haven-api", version, about = "Haven engagement backend")]
pub struct ApiArgs {
    /// Config file path (json/yaml/toml)
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    #[command(flatten)]
    pub overrides: CliOverrides,
}

/// Run the API server with the given arguments.
///
/// This is the main entry point for the server CLI, used by both the
/// standalone binary and the unified haven CLI.
pub async fn run(args: ApiArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = if args.config.exists() {
        load_config(&args.config)?
    } else {
        // No config file is fine for local runs; overrides still apply.
        Config::default()
    };
    apply_overrides(&mut config, &args.overrides);
    validate_config(&config)?;

    init_tracing(&config.logging);

    if let Some(listen) = &config.metrics.listen {
        match haven_metrics::init_prometheus(listen) {
            Ok(()) => info!("metrics exporter listening on {}", listen),
            Err(e) => warn!("failed to start metrics exporter: {}", e),
        }
    }

    let store = build_store(&config).await?;
    let limits = QuotaLimits {
        free_daily: config.quota.free_daily_messages,
    };
    let state = AppState::new(store, limits);

    // Set up graceful shutdown on SIGTERM/SIGINT
    let shutdown = CancellationToken::new();
    let shutdown_signal = shutdown.clone();
    tokio::spawn(async move {
        shutdown_signal_handler().await;
        shutdown_signal.cancel();
    });

    let listen: SocketAddr = config.server.listen.parse()?;
    serve(listen, router(state), shutdown).await?;
    Ok(())
}

async fn build_store(config: &Config) -> Result<SharedStore, Box<dyn std::error::Error>> {
    let store: SharedStore = match config.store.backend {
        StoreBackend::Memory => {
            warn!("memory store selected: data will not survive a restart");
            Arc::new(MemoryStore::new())
        }
        StoreBackend::Redis => {
            let store = RedisStore::connect(&config.store.redis_url).await?;
            info!(url = %config.store.redis_url, "connected to redis");
            Arc::new(store)
        }
    };
    Ok(store)
}

/// Initialize the tracing subscriber from logging config.
fn init_tracing(logging: &LoggingConfig) {
    let level = logging
        .level
        .as_deref()
        .unwrap_or(defaults::DEFAULT_LOG_LEVEL);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    match logging
        .format
        .as_deref()
        .unwrap_or(defaults::DEFAULT_LOG_FORMAT)
    {
        "json" => registry.with(fmt::layer().json()).init(),
        "compact" => registry.with(fmt::layer().compact()).init(),
        _ => registry.with(fmt::layer()).init(),
    }
}

/// Wait for shutdown signals (SIGTERM, SIGINT).
async fn shutdown_signal_handler() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to listen for Ctrl+C: {}", e);
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
                warn!("failed to listen for SIGTERM: {}", e);
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
}
