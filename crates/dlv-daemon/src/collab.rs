//! External collaborators the handlers delegate to.
//!
//! Both are trait objects held by `AppState` so tests (and a future real
//! auth/ledger integration) can swap them without touching the handlers.

use axum::http::HeaderMap;
use dlv_schemas::TransactionId;

// ---------------------------------------------------------------------------
// Session termination
// ---------------------------------------------------------------------------

/// Ends the caller's session with whatever auth provider fronts the app.
///
/// Implementations must not rely on local state: logout is answered the same
/// way whether or not a session existed.
pub trait SessionTerminator: Send + Sync {
    fn end_session(&self, headers: &HeaderMap) -> anyhow::Result<()>;
}

/// Default collaborator: there is no server-side session to end.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatelessSessions;

impl SessionTerminator for StatelessSessions {
    fn end_session(&self, _headers: &HeaderMap) -> anyhow::Result<()> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Transaction ids
// ---------------------------------------------------------------------------

/// Source of placeholder transaction ids for delivery confirmations.
pub trait TxIdSource: Send + Sync {
    fn next_id(&self) -> TransactionId;
}

/// Uniform over `0..=TransactionId::MAX_SEQ`. Not a ledger.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomTxIds;

impl TxIdSource for RandomTxIds {
    fn next_id(&self) -> TransactionId {
        TransactionId::clamped(fastrand::u32(0..=TransactionId::MAX_SEQ))
    }
}
