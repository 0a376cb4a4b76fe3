//! End-to-end report runs against the scripted stub API.

use kaspa_checker::checker::AddressChecker;
use kaspa_checker::config::{CheckerConfig, DEFAULT_ADDRESSES};
use kaspa_checker::report::{ReportRunner, RunOutcome, INTERRUPT_NOTICE};

use crate::stub_api::{Reply, StubApi};

fn default_addresses() -> Vec<String> {
    CheckerConfig::default().addresses
}

/// Slice of the report belonging to `address` (up to the next "Testing:").
fn section<'a>(report: &'a str, address: &str) -> &'a str {
    let start = report
        .find(&format!("Testing: {address}\n"))
        .unwrap_or_else(|| panic!("no section for {address}"));
    let rest = &report[start + 1..];
    let end = rest.find("Testing: ").map(|i| start + 1 + i).unwrap_or(report.len());
    &report[start..end]
}

async fn run(api: StubApi, addresses: &[String]) -> (RunOutcome, String) {
    let mut runner = ReportRunner::new(AddressChecker::new(api), Vec::new());
    let outcome = runner.run_to_completion(addresses).await.unwrap();
    (outcome, String::from_utf8(runner.into_inner()).unwrap())
}

#[tokio::test]
async fn test_one_call_per_address_in_order() {
    let api = StubApi::new();
    let calls = api.calls();
    let addresses = default_addresses();

    let (outcome, _) = run(api, &addresses).await;

    assert_eq!(outcome, RunOutcome::Completed { processed: 6 });
    assert_eq!(*calls.lock().unwrap(), DEFAULT_ADDRESSES.to_vec());
}

#[tokio::test]
async fn test_mixed_outcomes_report() {
    let a = DEFAULT_ADDRESSES[0];
    let b = DEFAULT_ADDRESSES[3];
    let c = DEFAULT_ADDRESSES[4];
    let d = DEFAULT_ADDRESSES[5];
    let api = StubApi::new()
        .reply(a, Reply::Status(200, r#"{"balance": 12345}"#))
        .reply(b, Reply::Status(400, "bad format"))
        .reply(c, Reply::Status(500, "server error"))
        .reply(d, Reply::Timeout);

    let (outcome, report) = run(api, &default_addresses()).await;
    assert_eq!(outcome.processed(), 6);

    let sa = section(&report, a);
    assert!(sa.contains("VALID (API accepted)"));
    assert!(sa.contains("Balance: 12345"));

    let sb = section(&report, b);
    assert!(sb.contains("INVALID (Status: 400)"));
    assert!(sb.contains("Invalid address format"));

    let sc = section(&report, c);
    assert!(sc.contains("INVALID (Status: 500)"));
    assert!(sc.contains("server error"));

    let sd = section(&report, d);
    assert!(sd.contains("ERROR:"));
    assert!(sd.contains("operation timed out"));
    assert!(sd.ends_with("\n\n"));
}

#[tokio::test]
async fn test_timeout_does_not_stop_the_run() {
    let first = DEFAULT_ADDRESSES[0];
    let api = StubApi::new().reply(first, Reply::Timeout);
    let calls = api.calls();

    let (outcome, report) = run(api, &default_addresses()).await;

    assert_eq!(outcome, RunOutcome::Completed { processed: 6 });
    assert_eq!(calls.lock().unwrap().len(), 6);
    assert!(section(&report, DEFAULT_ADDRESSES[1]).contains("INVALID (Status: 404)"));
}

#[tokio::test]
async fn test_interrupt_mid_run() {
    let api = StubApi::new();
    let calls = api.calls();
    let shutdown = api.interrupt_after(2);
    let addresses = default_addresses();

    let mut runner = ReportRunner::new(AddressChecker::new(api), Vec::new());
    let outcome = runner.run(&addresses, shutdown).await.unwrap();
    let report = String::from_utf8(runner.into_inner()).unwrap();

    assert_eq!(outcome, RunOutcome::Interrupted { processed: 2 });
    assert_eq!(*calls.lock().unwrap(), DEFAULT_ADDRESSES[..2].to_vec());
    assert!(report.trim_end().ends_with(INTERRUPT_NOTICE));
    assert!(!report.contains(&format!("Testing: {}", DEFAULT_ADDRESSES[3])));
}

#[tokio::test]
async fn test_local_format_line_does_not_gate_requests() {
    // "invalid-address" fails the local shape check but is still sent.
    let api = StubApi::new().reply("invalid-address", Reply::Status(400, ""));
    let calls = api.calls();

    let (_, report) = run(api, &["invalid-address".to_string()]).await;

    assert_eq!(*calls.lock().unwrap(), vec!["invalid-address".to_string()]);
    let s = section(&report, "invalid-address");
    assert!(s.contains("Local format: missing 'kaspa:' or 'kaspatest:' prefix"));
    assert!(s.contains("INVALID (Status: 400)"));
}
