//! Scenario: every failure on a mock endpoint is the same 500.
//!
//! # Invariant under test
//!
//! Unreadable, oversized, non-JSON or `null` bodies, and collaborator
//! failures, all answer `500 {"error":"Internal server error"}` and nothing
//! else. The underlying cause never reaches the wire.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderMap, Request, StatusCode},
};
use dlv_daemon::{
    collab::{RandomTxIds, SessionTerminator},
    routes, state,
};
use http_body_util::BodyExt;
use tower::ServiceExt; // oneshot

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const ALL_MOCK_ENDPOINTS: [&str; 3] = [
    routes::LOGOUT_PATH,
    routes::BID_STATUS_PATH,
    routes::CONFIRM_DELIVERY_PATH,
];

fn make_router() -> axum::Router {
    routes::build_router(Arc::new(state::AppState::new()))
}

fn post_raw(uri: &str, body: impl Into<axum::body::Body>) -> Request<axum::body::Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

async fn call(router: axum::Router, req: Request<axum::body::Body>) -> (StatusCode, bytes::Bytes) {
    let resp = router.oneshot(req).await.expect("oneshot failed");
    let status = resp.status();
    let body = resp
        .into_body()
        .collect()
        .await
        .expect("body collect failed")
        .to_bytes();
    (status, body)
}

fn assert_internal_error(status: StatusCode, body: &bytes::Bytes, ctx: &str) {
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{ctx}");
    assert_eq!(
        body.as_ref(),
        br#"{"error":"Internal server error"}"#,
        "{ctx}: body must be exactly the fixed error"
    );
}

// ---------------------------------------------------------------------------
// Malformed JSON on every endpoint
// ---------------------------------------------------------------------------

#[tokio::test]
async fn malformed_json_is_500_on_every_endpoint() {
    for uri in ALL_MOCK_ENDPOINTS {
        for bad in ["not json", "{\"bidId\": ", "{'orderId': 1}", "\u{0}"] {
            let (status, body) = call(make_router(), post_raw(uri, bad)).await;
            assert_internal_error(status, &body, &format!("{uri} <- {bad:?}"));
        }
    }
}

#[tokio::test]
async fn empty_body_is_500_for_bid_and_delivery() {
    for uri in [routes::BID_STATUS_PATH, routes::CONFIRM_DELIVERY_PATH] {
        let (status, body) = call(make_router(), post_raw(uri, axum::body::Body::empty())).await;
        assert_internal_error(status, &body, uri);
    }
}

#[tokio::test]
async fn null_body_is_500_for_bid_and_delivery() {
    for uri in [routes::BID_STATUS_PATH, routes::CONFIRM_DELIVERY_PATH] {
        let (status, body) = call(make_router(), post_raw(uri, "null")).await;
        assert_internal_error(status, &body, uri);
    }
}

// ---------------------------------------------------------------------------
// Nesting beyond the JSON recursion limit
// ---------------------------------------------------------------------------

#[tokio::test]
async fn nesting_past_recursion_limit_is_500() {
    let deep = format!(
        r#"{{"bidId":{}1{},"status":"open"}}"#,
        "[".repeat(200),
        "]".repeat(200)
    );
    let (status, body) = call(make_router(), post_raw(routes::BID_STATUS_PATH, deep)).await;
    assert_internal_error(status, &body, "200-deep bidId");

    let shallow = format!(
        r#"{{"bidId":{}1{},"status":"open"}}"#,
        "[".repeat(100),
        "]".repeat(100)
    );
    let (status, _) = call(make_router(), post_raw(routes::BID_STATUS_PATH, shallow)).await;
    assert_eq!(status, StatusCode::OK, "nesting under the limit is echoed");
}

// ---------------------------------------------------------------------------
// Oversized body
// ---------------------------------------------------------------------------

#[tokio::test]
async fn oversized_body_is_500_not_413() {
    let router = make_router().layer(DefaultBodyLimit::max(32));
    let big = format!(r#"{{"bidId":"{}","status":"open"}}"#, "x".repeat(256));

    let (status, body) = call(router, post_raw(routes::BID_STATUS_PATH, big)).await;
    assert_internal_error(status, &body, "oversized bid body");
}

// ---------------------------------------------------------------------------
// Collaborator failure
// ---------------------------------------------------------------------------

struct BrokenAuth;

impl SessionTerminator for BrokenAuth {
    fn end_session(&self, _headers: &HeaderMap) -> anyhow::Result<()> {
        anyhow::bail!("auth provider unreachable: token endpoint refused connection")
    }
}

#[tokio::test]
async fn session_failure_is_500_without_leaking_cause() {
    let st = state::AppState::with_collaborators(Arc::new(BrokenAuth), Arc::new(RandomTxIds));
    let router = routes::build_router(Arc::new(st));

    let (status, body) = call(router, post_raw(routes::LOGOUT_PATH, axum::body::Body::empty())).await;
    assert_internal_error(status, &body, "logout with failing auth");
    assert!(!String::from_utf8_lossy(&body).contains("unreachable"));
}

#[tokio::test]
async fn session_failure_does_not_affect_other_endpoints() {
    let st = state::AppState::with_collaborators(Arc::new(BrokenAuth), Arc::new(RandomTxIds));
    let router = routes::build_router(Arc::new(st));

    let (status, _) = call(
        router,
        post_raw(routes::BID_STATUS_PATH, r#"{"bidId":"1","status":"open"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}
