//! Typed view over the merged config that the daemon consumes.

use std::net::SocketAddr;

use anyhow::{bail, Context, Result};
use serde_json::Value;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8899";
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 64 * 1024;
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Browser dev servers that may call the daemon when no origins are configured.
pub const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "http://localhost",
    "http://127.0.0.1",
    "http://localhost:3000",
    "http://127.0.0.1:3000",
    "http://localhost:5173",
    "http://127.0.0.1:5173",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaemonSettings {
    pub bind_addr: SocketAddr,
    pub cors_origins: Vec<String>,
    pub body_limit_bytes: usize,
    pub log_filter: String,
}

impl Default for DaemonSettings {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR
                .parse()
                .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 8899))),
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl DaemonSettings {
    /// Read settings from merged config JSON. Absent keys take defaults; a
    /// present key with the wrong shape is an error naming the pointer.
    pub fn from_config_json(config_json: &Value) -> Result<Self> {
        let mut out = Self::default();

        if let Some(v) = present(config_json, "/server/bind_addr") {
            let raw = expect_str(v, "/server/bind_addr")?;
            out.bind_addr = raw
                .parse()
                .with_context(|| format!("CONFIG_INVALID leaf=/server/bind_addr value={raw:?}"))?;
        }

        if let Some(v) = present(config_json, "/server/cors_origins") {
            let Some(arr) = v.as_array() else {
                bail!("CONFIG_INVALID leaf=/server/cors_origins: expected a list of origins");
            };
            out.cors_origins = arr
                .iter()
                .enumerate()
                .map(|(i, o)| -> Result<String> {
                    let ptr = format!("/server/cors_origins/{i}");
                    let origin = expect_str(o, &ptr)?;
                    http::HeaderValue::from_str(origin).with_context(|| {
                        format!("CONFIG_INVALID leaf={ptr}: not a valid origin header value")
                    })?;
                    Ok(origin.to_string())
                })
                .collect::<Result<Vec<_>>>()?;
        }

        if let Some(v) = present(config_json, "/server/body_limit_bytes") {
            let n = v.as_u64().filter(|n| *n > 0).ok_or_else(|| {
                anyhow::anyhow!(
                    "CONFIG_INVALID leaf=/server/body_limit_bytes: expected a positive integer"
                )
            })?;
            out.body_limit_bytes = usize::try_from(n)
                .context("CONFIG_INVALID leaf=/server/body_limit_bytes: too large")?;
        }

        if let Some(v) = present(config_json, "/logging/filter") {
            out.log_filter = expect_str(v, "/logging/filter")?.to_string();
        }

        Ok(out)
    }
}

/// YAML `~` and JSON `null` mean "use the default".
fn present<'a>(root: &'a Value, ptr: &str) -> Option<&'a Value> {
    root.pointer(ptr).filter(|v| !v.is_null())
}

fn expect_str<'a>(v: &'a Value, ptr: &str) -> Result<&'a str> {
    match v.as_str() {
        Some(s) => Ok(s),
        None => bail!("CONFIG_INVALID leaf={ptr}: expected a string"),
    }
}
