//! Address checker.
//!
//! Turns one address into one `AddressCheckResult` using exactly one
//! `BalanceApi` call. Network failures are folded into the result, so
//! `check` never fails.

use tracing::{debug, warn};

use crate::api::{ApiResponse, BalanceApi};
use crate::types::{AddressCheckResult, CheckerError, ResponseBody};

pub struct AddressChecker<A> {
    api: A,
}

impl<A: BalanceApi> AddressChecker<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Check a single address against the balance API.
    pub async fn check(&self, address: &str) -> AddressCheckResult {
        let result = match self.api.fetch_balance(address).await {
            Ok(resp) => Self::from_response(address, resp),
            Err(CheckerError::Network { message, .. }) => {
                warn!(address, error = %message, "Balance request failed");
                AddressCheckResult::network_failure(address, message)
            }
            Err(other) => {
                warn!(address, error = %other, "Balance request failed");
                AddressCheckResult::network_failure(address, other.to_string())
            }
        };
        debug!(result = %result, valid = result.valid(), "Address checked");
        result
    }

    /// A 200 body is parsed as JSON when possible; anything else stays raw.
    fn from_response(address: &str, resp: ApiResponse) -> AddressCheckResult {
        let body = if resp.status == 200 {
            match serde_json::from_str(&resp.body) {
                Ok(value) => ResponseBody::Json(value),
                Err(e) => {
                    debug!(address, error = %e, "200 body is not JSON, keeping raw text");
                    ResponseBody::Text(resp.body)
                }
            }
        } else {
            ResponseBody::Text(resp.body)
        };
        AddressCheckResult::response(address, resp.status, body)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
