//! dlv-daemon entry point.
//!
//! Thin on purpose: load config, set up tracing, build the state, wire
//! middleware, serve. Handlers live in `routes.rs`.

use std::sync::Arc;

use anyhow::Context;
use dlv_config::{report_unused_keys, DaemonSettings, LoadedConfig, UnusedKeyPolicy};
use dlv_daemon::{app, state};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Silent if the file does not exist; production injects env vars directly.
    let _ = dotenvy::from_filename(".env.local");

    let loaded = load_config_from_env()?;
    let settings = DaemonSettings::from_config_json(&loaded.config_json)?;

    init_tracing(&settings.log_filter);
    info!(config_hash = %loaded.config_hash, "config loaded");

    let report = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Warn)?;
    if !report.is_clean() {
        warn!(unused = ?report.unused_leaf_pointers, "config contains keys the daemon does not read");
    }

    let shared = Arc::new(state::AppState::new());

    let router = app::build_app(shared, &settings)?;

    let env_addr = std::env::var("DLV_DAEMON_ADDR").ok();
    let addr = app::resolve_bind_addr(env_addr.as_deref(), settings.bind_addr);
    info!("dlv-daemon listening on http://{}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server crashed")?;

    Ok(())
}

/// `DLV_CONFIG` is a comma-separated list of YAML layers, base first.
fn load_config_from_env() -> anyhow::Result<LoadedConfig> {
    match std::env::var("DLV_CONFIG") {
        Ok(raw) if !raw.trim().is_empty() => {
            let paths: Vec<&str> = raw
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .collect();
            dlv_config::load_layered_yaml(&paths).context("failed to load DLV_CONFIG layers")
        }
        _ => LoadedConfig::empty(),
    }
}

fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c; shutting down");
    }
    info!("shutdown requested");
}
