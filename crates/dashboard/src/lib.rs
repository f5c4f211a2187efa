//! GetAround delay analytics service library.
//!
//! Loads the rental delay spreadsheet once and serves every aggregate of the
//! analysis as JSON, recomputed per request from query parameters.

pub mod app;
pub mod config;
pub mod dataset;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");
