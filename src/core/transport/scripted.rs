//! In-memory transport driven by a closure

use super::{Transport, TransportError, TransportResponse};
use crate::core::request::RequestTarget;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;

type Responder =
    dyn Fn(&RequestTarget, usize) -> Result<TransportResponse, TransportError> + Send + Sync;

/// One request seen by a [`ScriptedTransport`]
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub target: RequestTarget,
    /// Time since the transport was created
    pub at: Duration,
}

/// Answers every request from a closure, recording each call.
///
/// The closure receives the target and how many times the same method and
/// URL were requested before, so retries can be scripted.
pub struct ScriptedTransport {
    responder: Box<Responder>,
    latency: Duration,
    started: Instant,
    calls: Mutex<Vec<RecordedCall>>,
    attempts: Mutex<HashMap<(String, String), usize>>,
}

impl ScriptedTransport {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&RequestTarget, usize) -> Result<TransportResponse, TransportError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            responder: Box::new(responder),
            latency: Duration::ZERO,
            started: Instant::now(),
            calls: Mutex::new(Vec::new()),
            attempts: Mutex::new(HashMap::new()),
        }
    }

    /// Transport that answers every request with `200 OK` and an empty JSON object
    pub fn always_ok() -> Self {
        Self::new(|_, _| Ok(TransportResponse::ok("{}")))
    }

    /// Simulated time each response takes to arrive
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, target: &RequestTarget) -> Result<TransportResponse, TransportError> {
        let attempt = {
            let mut attempts = self.attempts.lock();
            let counter = attempts
                .entry((target.method.to_string(), target.url.clone()))
                .or_insert(0);
            let attempt = *counter;
            *counter += 1;
            attempt
        };
        self.calls.lock().push(RecordedCall {
            target: target.clone(),
            at: self.started.elapsed(),
        });

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        (self.responder)(target, attempt)
    }
}
