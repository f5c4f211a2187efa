//! GetAround pricing API library.
//!
//! Exposes config, state, error handling and the router builder so the
//! binary entrypoint and the integration tests share one code path.

pub mod app;
pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

/// Version reported by `/health` and `/version`.
pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
