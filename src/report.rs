//! Report runner.
//!
//! Walks the address list strictly in order, checks each address and
//! prints a line-oriented report. A shutdown future (ctrl-c in the
//! binary) ends the run between or during checks with a short notice.

use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;
use std::future::Future;
use std::io::Write;
use tracing::info;

use crate::address;
use crate::api::BalanceApi;
use crate::checker::AddressChecker;
use crate::types::{AddressCheckResult, CheckOutcome, CheckerError};

const SOMPI_PER_KAS: Decimal = dec!(100000000);

/// Printed when the shutdown future fires.
pub const INTERRUPT_NOTICE: &str = "Check interrupted by user";

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed { processed: usize },
    Interrupted { processed: usize },
}

impl RunOutcome {
    pub fn processed(&self) -> usize {
        match self {
            RunOutcome::Completed { processed } | RunOutcome::Interrupted { processed } => *processed,
        }
    }
}

pub struct ReportRunner<A, W> {
    checker: AddressChecker<A>,
    out: W,
}

impl<A: BalanceApi, W: Write> ReportRunner<A, W> {
    pub fn new(checker: AddressChecker<A>, out: W) -> Self {
        Self { checker, out }
    }

    /// Give back the output sink (tests read the report from it).
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Check every address in order, stopping early if `shutdown` resolves.
    ///
    /// Only report I/O failures are returned as errors; per-address
    /// network failures are part of the report.
    pub async fn run<S>(&mut self, addresses: &[String], shutdown: S) -> Result<RunOutcome, CheckerError>
    where
        S: Future<Output = ()>,
    {
        let Self { checker, out } = self;
        tokio::pin!(shutdown);

        let started = Utc::now();
        writeln!(out, "🔍 Checking Kaspa addresses against {} ...", checker.api().base_url())?;
        writeln!(out)?;

        let mut processed = 0;
        for addr in addresses {
            writeln!(out, "Testing: {addr}")?;
            writeln!(out, "   Local format: {}", address::inspect(addr))?;
            out.flush()?;

            let result = tokio::select! {
                biased;
                _ = &mut shutdown => None,
                r = checker.check(addr) => Some(r),
            };

            let Some(result) = result else {
                writeln!(out)?;
                writeln!(out, "{INTERRUPT_NOTICE}")?;
                out.flush()?;
                info!(processed, "Run interrupted");
                return Ok(RunOutcome::Interrupted { processed });
            };

            write_result(out, &result)?;
            out.flush()?;
            processed += 1;
        }

        info!(
            processed,
            elapsed_ms = (Utc::now() - started).num_milliseconds(),
            "Run complete"
        );
        Ok(RunOutcome::Completed { processed })
    }

    /// Run with no shutdown signal.
    pub async fn run_to_completion(&mut self, addresses: &[String]) -> Result<RunOutcome, CheckerError> {
        self.run(addresses, futures::future::pending::<()>()).await
    }
}

/// Print the verdict block for one result, ending with a blank line.
pub fn write_result<W: Write>(out: &mut W, result: &AddressCheckResult) -> std::io::Result<()> {
    match &result.outcome {
        CheckOutcome::NetworkFailure { error_message } => {
            writeln!(out, "⚠️ ERROR: {error_message}")?;
        }
        CheckOutcome::Response { body, .. } if result.valid() => {
            writeln!(out, "✅ VALID (API accepted)")?;
            if let Some(fields) = body.as_object() {
                let balance = fields.get("balance").cloned().unwrap_or(Value::from(0));
                writeln!(out, "   Balance: {}", format_balance(&balance))?;
            }
        }
        CheckOutcome::Response { status_code, body } => {
            writeln!(out, "❌ INVALID (Status: {status_code})")?;
            if *status_code == 400 {
                writeln!(out, "   Error: Invalid address format")?;
            } else {
                writeln!(out, "   Response: {body}")?;
            }
        }
    }
    writeln!(out)
}

/// Integer balances are sompi and get a KAS conversion; anything else
/// is printed as the API sent it.
fn format_balance(balance: &Value) -> String {
    match balance {
        Value::Number(n) => match n.as_u64() {
            Some(sompi) => {
                let kas = (Decimal::from(sompi) / SOMPI_PER_KAS).normalize();
                format!("{sompi} sompi ({kas} KAS)")
            }
            None => n.to_string(),
        },
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
