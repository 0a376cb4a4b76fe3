//! kaspa-checker: Kaspa address checks against the public balance API.
//!
//! Entry point. Loads optional configuration, initialises structured
//! logging, then checks every configured address in order and prints a
//! report to stdout. Ctrl+C stops the run cleanly; any other failure is
//! reported as a single line and the process still exits normally.

use anyhow::{Context, Result};
use tracing::{error, info};

use kaspa_checker::api::kaspa::KaspaRestClient;
use kaspa_checker::checker::AddressChecker;
use kaspa_checker::config::{CheckerConfig, DEFAULT_CONFIG_FILE};
use kaspa_checker::report::ReportRunner;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    init_logging();

    if let Err(e) = run().await {
        error!(error = %format!("{e:#}"), "Run aborted");
        println!("Error running checks: {e:#}");
    }
}

async fn run() -> Result<()> {
    let cfg = CheckerConfig::load_or_default(DEFAULT_CONFIG_FILE)?;
    info!(
        base_url = %cfg.api.base_url,
        timeout_secs = cfg.api.timeout_secs,
        addresses = cfg.addresses.len(),
        "kaspa-checker starting"
    );

    let client = KaspaRestClient::new(&cfg.api).context("Failed to create Kaspa API client")?;
    let mut runner = ReportRunner::new(AddressChecker::new(client), std::io::stdout());

    let shutdown = async {
        // If the handler can't be installed, just never interrupt.
        if tokio::signal::ctrl_c().await.is_err() {
            futures::future::pending::<()>().await;
        }
    };

    let outcome = runner
        .run(&cfg.addresses, shutdown)
        .await
        .context("Failed to write report")?;

    info!(?outcome, "kaspa-checker finished");
    Ok(())
}

/// Initialise the `tracing` subscriber. Logs go to stderr so the
/// stdout report stays readable.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("kaspa_checker=warn"));

    let json_logging = std::env::var("KASPA_CHECKER_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}
