//! Shared runtime state for dlv-daemon.
//!
//! Nothing here is mutable: handlers receive `State<Arc<AppState>>` and only
//! read build metadata or call the injected collaborators.

use std::sync::Arc;

use crate::collab::{RandomTxIds, SessionTerminator, StatelessSessions, TxIdSource};

/// Static build metadata included in health responses.
#[derive(Clone, Debug)]
pub struct BuildInfo {
    pub service: &'static str,
    pub version: &'static str,
}

/// Cloneable (Arc) handle shared across all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub build: BuildInfo,
    /// Auth provider hook for logout.
    pub sessions: Arc<dyn SessionTerminator>,
    /// Placeholder transaction ids for delivery confirmations.
    pub tx_ids: Arc<dyn TxIdSource>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_collaborators(Arc::new(StatelessSessions), Arc::new(RandomTxIds))
    }

    pub fn with_collaborators(
        sessions: Arc<dyn SessionTerminator>,
        tx_ids: Arc<dyn TxIdSource>,
    ) -> Self {
        Self {
            build: BuildInfo {
                service: "dlv-daemon",
                version: env!("CARGO_PKG_VERSION"),
            },
            sessions,
            tx_ids,
        }
    }
}
