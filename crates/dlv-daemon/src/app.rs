//! Middleware wiring and bind-address resolution shared by `main.rs` and tests.

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    Router,
};
use dlv_config::DaemonSettings;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{warn, Level};

use crate::{routes, state::AppState};

/// The router with body limit, request tracing and CORS from `settings`.
pub fn build_app(state: Arc<AppState>, settings: &DaemonSettings) -> anyhow::Result<Router> {
    Ok(routes::build_router(state)
        .layer(DefaultBodyLimit::max(settings.body_limit_bytes))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_for_origins(&settings.cors_origins)?))
}

fn cors_for_origins(allowed_origins: &[String]) -> anyhow::Result<CorsLayer> {
    let origins = allowed_origins
        .iter()
        .map(|o| HeaderValue::from_str(o).with_context(|| format!("invalid cors origin {o:?}")))
        .collect::<anyhow::Result<Vec<HeaderValue>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(tower_http::cors::Any))
}

/// `DLV_DAEMON_ADDR` wins when it parses; an unparsable value is logged and ignored.
pub fn resolve_bind_addr(env_value: Option<&str>, configured: SocketAddr) -> SocketAddr {
    let Some(raw) = env_value else {
        return configured;
    };
    match raw.trim().parse() {
        Ok(addr) => addr,
        Err(e) => {
            warn!(value = raw, error = %e, fallback = %configured, "DLV_DAEMON_ADDR is not a socket address; using configured bind_addr");
            configured
        }
    }
}
