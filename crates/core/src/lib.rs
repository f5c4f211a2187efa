//! Domain logic for the rental pricing API and the delay analytics report.
//!
//! Everything here is synchronous and free of I/O except artifact loading
//! in [`model::artifact`]; the serving crates wrap it in HTTP.

pub mod delay;
pub mod error;
pub mod model;
pub mod prediction;
