//! HTTP serving plumbing shared by the pricing API and the analytics
//! service: environment config, the middleware stack, log setup and
//! signal-driven shutdown.

pub mod config;
pub mod middleware;
pub mod serve;
pub mod telemetry;

pub use config::{ConfigError, HttpConfig, LogFormat};
