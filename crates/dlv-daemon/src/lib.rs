//! dlv-daemon library target.
//!
//! Exposes the router, state and collaborator seams for integration tests.
//! The binary `main.rs` depends on this library target.

pub mod app;
pub mod collab;
pub mod error;
pub mod routes;
pub mod state;

mod body;
