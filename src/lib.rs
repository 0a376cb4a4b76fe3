//! kaspa-checker: Kaspa address checks against the public balance API.
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod api;
pub mod address;
pub mod checker;
pub mod report;
