//! Axum router and all HTTP handlers for dlv-daemon.
//!
//! `build_router` is the single entry point; `app::build_app` wraps it in
//! middleware for `main.rs`. Tests in `tests/` drive either.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use dlv_schemas::{
    BidStatusUpdate, DeliveryConfirmation, DeliveryResponse, HealthResponse, MessageResponse,
};
use tracing::info;

use crate::{
    body::{check_optional_json, decode_echo_body},
    error::ApiError,
    state::AppState,
};

pub const LOGOUT_PATH: &str = "/api/auth/logout";
pub const BID_STATUS_PATH: &str = "/api/bids/update-status";
pub const CONFIRM_DELIVERY_PATH: &str = "/api/orders/confirm-delivery";
pub const HEALTH_PATH: &str = "/api/health";

pub const LOGOUT_MESSAGE: &str = "Logout successful";

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the complete application router wired to the given shared state.
///
/// Middleware layers (CORS, tracing, body limit) are **not** applied here;
/// `app::build_app` attaches them so tests can also use the bare router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(HEALTH_PATH, get(health))
        .route(LOGOUT_PATH, post(logout))
        .route(BID_STATUS_PATH, post(update_bid_status))
        .route(CONFIRM_DELIVERY_PATH, post(confirm_delivery))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// GET /api/health
// ---------------------------------------------------------------------------

pub(crate) async fn health(State(st): State<Arc<AppState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            ok: true,
            service: st.build.service,
            version: st.build.version,
        }),
    )
}

// ---------------------------------------------------------------------------
// POST /api/auth/logout
// ---------------------------------------------------------------------------

/// Hand session teardown to the auth collaborator and acknowledge.
///
/// Succeeds whether or not the caller had a session.
pub(crate) async fn logout(
    State(st): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    check_optional_json(&body?)?;
    st.sessions.end_session(&headers).map_err(ApiError::Session)?;

    info!("auth/logout");
    Ok(Json(MessageResponse::new(LOGOUT_MESSAGE)))
}

// ---------------------------------------------------------------------------
// POST /api/bids/update-status
// ---------------------------------------------------------------------------

/// Echo the bid id and status back. Nothing is validated or stored.
pub(crate) async fn update_bid_status(
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let req: BidStatusUpdate = decode_echo_body(&body?)?;

    info!(bid_id = %req.bid_id, status = %req.status, "bids/update-status");
    Ok(Json(MessageResponse::new(format!(
        "Bid {} status updated to {}",
        req.bid_id, req.status
    ))))
}

// ---------------------------------------------------------------------------
// POST /api/orders/confirm-delivery
// ---------------------------------------------------------------------------

/// Acknowledge a delivery with a placeholder transaction id.
///
/// The order is not looked up and no escrow is released; the proof is dropped
/// unread.
pub(crate) async fn confirm_delivery(
    State(st): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<DeliveryResponse>, ApiError> {
    let req: DeliveryConfirmation = decode_echo_body(&body?)?;
    let transaction_id = st.tx_ids.next_id();

    info!(
        order_id = %req.order_id,
        has_proof = !req.delivery_proof.is_missing(),
        %transaction_id,
        "orders/confirm-delivery"
    );
    Ok(Json(DeliveryResponse {
        message: format!("Order {} marked as delivered", req.order_id),
        transaction_id,
    }))
}
