//! Balance API integration.
//!
//! Defines the `BalanceApi` trait, the seam between the checker and the
//! network, and the reqwest-backed Kaspa REST implementation.

pub mod kaspa;

use async_trait::async_trait;

use crate::types::CheckerError;

/// A completed HTTP exchange: status code plus the body as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Abstraction over balance-lookup services.
///
/// Implementors issue exactly one request per call and never retry.
/// Any failure to complete the exchange is a `CheckerError::Network`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BalanceApi: Send + Sync {
    /// Look up the balance of `address`, passed verbatim as a path segment.
    async fn fetch_balance(&self, address: &str) -> Result<ApiResponse, CheckerError>;

    /// Base URL of the service, for the report header.
    fn base_url(&self) -> String;
}
