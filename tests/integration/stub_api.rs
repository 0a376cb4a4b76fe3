//! Scripted balance API for integration testing.
//!
//! Replies are keyed by address, every call is recorded in order, and
//! an optional trigger fires a "ctrl-c" after the N-th call, all
//! in-memory with no network.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

use kaspa_checker::api::{ApiResponse, BalanceApi};
use kaspa_checker::types::CheckerError;

/// What the stub answers for one address.
#[derive(Debug, Clone)]
pub enum Reply {
    Status(u16, &'static str),
    Timeout,
}

pub struct StubApi {
    replies: HashMap<String, Reply>,
    calls: Arc<Mutex<Vec<String>>>,
    interrupt: Mutex<Option<(usize, oneshot::Sender<()>)>>,
}

impl StubApi {
    /// Unscripted addresses get a 404.
    pub fn new() -> Self {
        Self {
            replies: HashMap::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            interrupt: Mutex::new(None),
        }
    }

    pub fn reply(mut self, address: &str, reply: Reply) -> Self {
        self.replies.insert(address.to_string(), reply);
        self
    }

    /// Returns a future that resolves once `after_calls` requests were made.
    pub fn interrupt_after(&self, after_calls: usize) -> impl std::future::Future<Output = ()> {
        let (tx, rx) = oneshot::channel();
        *self.interrupt.lock().unwrap() = Some((after_calls, tx));
        async move {
            let _ = rx.await;
        }
    }

    /// Shared handle to the recorded calls; stays valid after the stub moves.
    pub fn calls(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl BalanceApi for StubApi {
    async fn fetch_balance(&self, address: &str) -> Result<ApiResponse, CheckerError> {
        let count = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(address.to_string());
            calls.len()
        };

        let mut interrupt = self.interrupt.lock().unwrap();
        if interrupt.as_ref().is_some_and(|(n, _)| *n == count) {
            if let Some((_, tx)) = interrupt.take() {
                let _ = tx.send(());
            }
        }
        drop(interrupt);

        match self.replies.get(address) {
            Some(Reply::Status(status, body)) => Ok(ApiResponse::new(*status, *body)),
            Some(Reply::Timeout) => Err(CheckerError::Network {
                address: address.to_string(),
                message: format!("error sending request for url (http://stub/addresses/{address}/balance): operation timed out"),
            }),
            None => Ok(ApiResponse::new(404, "not found")),
        }
    }

    fn base_url(&self) -> String {
        "http://stub".to_string()
    }
}
