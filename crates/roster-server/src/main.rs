//! roster server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the SQLite
//! store, and serves the employee JSON API over HTTP.

mod config;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use axum::Router;
use clap::Parser;
use roster_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
  request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
  trace::TraceLayer,
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;

#[derive(Parser)]
#[command(author, version, about = "Roster employee service")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Serve from a throwaway in-memory store instead of `store_path`.
  #[arg(long)]
  in_memory: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let server_cfg = ServerConfig::load(&cli.config)?;

  let store = if cli.in_memory {
    tracing::warn!("using an in-memory store; data is lost on exit");
    SqliteStore::open_in_memory()
      .await
      .context("failed to open in-memory store")?
  } else {
    let store_path = server_cfg.resolved_store_path();
    SqliteStore::open(&store_path)
      .await
      .with_context(|| format!("failed to open store at {store_path:?}"))?
  };

  let app = app(store, &server_cfg.mount_path());
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}{}", server_cfg.mount_path());
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  Ok(())
}

/// Mount the API under `mount_path` and wrap it in request-id and tracing
/// layers.
fn app(store: SqliteStore, mount_path: &str) -> Router {
  let api = roster_api::api_router(Arc::new(store));
  let router = if mount_path.is_empty() {
    api
  } else {
    Router::new().nest(mount_path, api)
  };

  router.layer(
    ServiceBuilder::new()
      .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
      .layer(PropagateRequestIdLayer::x_request_id())
      .layer(TraceLayer::new_for_http()),
  )
}

async fn shutdown_signal() {
  match tokio::signal::ctrl_c().await {
    Ok(()) => tracing::info!("shutdown signal received"),
    Err(e) => {
      tracing::error!(error = %e, "failed to listen for ctrl-c; running until killed");
      std::future::pending::<()>().await;
    }
  }
}
