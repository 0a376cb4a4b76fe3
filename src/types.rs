//! Shared types for the Kaspa address checker.
//!
//! A check produces one `AddressCheckResult`. It lives only long enough
//! to be printed by the report runner and is then dropped.

use serde::Serialize;
use std::fmt;

// ---------------------------------------------------------------------------
// Response body
// ---------------------------------------------------------------------------

/// Body of an API response: parsed JSON on a well-formed 200, raw text
/// in every other case.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Json(serde_json::Value),
    Text(String),
}

impl ResponseBody {
    /// The JSON object, if the body is a structured value with fields.
    pub fn as_object(&self) -> Option<&serde_json::Map<String, serde_json::Value>> {
        match self {
            ResponseBody::Json(value) => value.as_object(),
            ResponseBody::Text(_) => None,
        }
    }
}

impl fmt::Display for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseBody::Json(value) => write!(f, "{value}"),
            ResponseBody::Text(text) => f.write_str(text),
        }
    }
}

// ---------------------------------------------------------------------------
// Check result
// ---------------------------------------------------------------------------

/// What happened to the single request made for an address.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CheckOutcome {
    /// The request completed with an HTTP status.
    Response { status_code: u16, body: ResponseBody },
    /// The request never completed (timeout, DNS, connection refused).
    NetworkFailure { error_message: String },
}

/// Result of checking one address against the balance API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddressCheckResult {
    /// The address exactly as supplied.
    pub address: String,
    pub outcome: CheckOutcome,
}

impl AddressCheckResult {
    pub fn response(address: &str, status_code: u16, body: ResponseBody) -> Self {
        Self {
            address: address.to_string(),
            outcome: CheckOutcome::Response { status_code, body },
        }
    }

    pub fn network_failure(address: &str, error_message: impl Into<String>) -> Self {
        Self {
            address: address.to_string(),
            outcome: CheckOutcome::NetworkFailure {
                error_message: error_message.into(),
            },
        }
    }

    /// True iff the API answered with HTTP 200.
    pub fn valid(&self) -> bool {
        self.status_code() == Some(200)
    }

    pub fn status_code(&self) -> Option<u16> {
        match &self.outcome {
            CheckOutcome::Response { status_code, .. } => Some(*status_code),
            CheckOutcome::NetworkFailure { .. } => None,
        }
    }

    pub fn response_body(&self) -> Option<&ResponseBody> {
        match &self.outcome {
            CheckOutcome::Response { body, .. } => Some(body),
            CheckOutcome::NetworkFailure { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            CheckOutcome::NetworkFailure { error_message } => Some(error_message),
            CheckOutcome::Response { .. } => None,
        }
    }
}

impl fmt::Display for AddressCheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            CheckOutcome::Response { status_code, .. } => {
                write!(f, "{} -> HTTP {status_code}", self.address)
            }
            CheckOutcome::NetworkFailure { error_message } => {
                write!(f, "{} -> network error: {error_message}", self.address)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for the checker.
#[derive(Debug, thiserror::Error)]
pub enum CheckerError {
    /// The HTTP call itself failed. Recovered per address by the checker.
    #[error("Network error ({address}): {message}")]
    Network { address: String, message: String },

    /// Writing the report failed.
    #[error("Report output error: {0}")]
    Report(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP client error: {0}")]
    Http(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
