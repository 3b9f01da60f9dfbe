//! The dispatch loop

use super::config::DispatchConfig;
use super::progress::ProgressSink;
use crate::core::request::PendingRequest;
use crate::core::transport::Transport;
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, warn};

/// Result of one dispatch call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// One rendered message per failed request, in completion order
    pub failures: Vec<String>,
    pub attempted: usize,
    pub completed: usize,
}

impl DispatchOutcome {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn succeeded(&self) -> usize {
        self.completed.saturating_sub(self.failures.len())
    }
}

/// Failure log and completion counter, owned by the dispatching task
#[derive(Debug)]
struct BatchState {
    total: usize,
    completed: usize,
    failures: Vec<String>,
}

impl BatchState {
    fn new(total: usize) -> Self {
        Self {
            total,
            completed: 0,
            failures: Vec::new(),
        }
    }

    fn record(&mut self, failure: Option<String>) {
        self.completed += 1;
        if let Some(message) = failure {
            self.failures.push(message);
        }
    }

    fn is_done(&self) -> bool {
        self.completed >= self.total
    }

    fn into_outcome(self) -> DispatchOutcome {
        DispatchOutcome {
            failures: self.failures,
            attempted: self.total,
            completed: self.completed,
        }
    }
}

/// Sends requests in fixed-size chunks spaced by a fixed delay
pub struct ChunkedDispatcher<'a, T: Transport + ?Sized> {
    transport: &'a T,
    config: DispatchConfig,
}

impl<'a, T: Transport + ?Sized> ChunkedDispatcher<'a, T> {
    pub fn new(transport: &'a T, config: DispatchConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Send every request and wait for all of them.
    ///
    /// Progress is reported before each chunk starts and exactly once with
    /// `100.0` when the last request completes.
    pub async fn dispatch(
        &self,
        requests: &[PendingRequest],
        progress: &mut dyn ProgressSink,
    ) -> DispatchOutcome {
        let total = requests.len();
        let chunk_size = self.config.chunk_size.max(1);
        let mut state = BatchState::new(total);

        info!(
            requests = total,
            chunks = self.config.chunk_count(total),
            chunk_size,
            "Dispatching requests"
        );

        let mut in_flight = FuturesUnordered::new();
        let mut next_start = 0usize;
        let mut deadline = Instant::now();

        while !state.is_done() {
            if next_start < total {
                tokio::select! {
                    _ = sleep_until(deadline) => {
                        let end = (next_start + chunk_size).min(total);
                        debug!(start = next_start, end, "Starting chunk");
                        progress.report(next_start as f64 * 100.0 / total as f64);
                        for request in &requests[next_start..end] {
                            in_flight.push(self.send(request));
                        }
                        next_start = end;
                        deadline += self.config.chunk_delay;
                    }
                    Some(failure) = in_flight.next(), if !in_flight.is_empty() => {
                        state.record(failure);
                    }
                }
            } else {
                match in_flight.next().await {
                    Some(failure) => state.record(failure),
                    None => break,
                }
            }
        }

        progress.report(100.0);
        let outcome = state.into_outcome();
        info!(
            completed = outcome.completed,
            failed = outcome.failures.len(),
            "Dispatch finished"
        );
        outcome
    }

    /// Send one request, retrying immediately on 5xx. Returns the failure
    /// message, if any.
    async fn send(&self, request: &PendingRequest) -> Option<String> {
        let mut retries = 0u32;
        loop {
            match self.transport.execute(&request.target).await {
                Ok(response) if response.is_success() => return None,
                Ok(response)
                    if response.is_server_error()
                        && retries < self.config.server_error_retries =>
                {
                    retries += 1;
                    warn!(
                        url = %request.target.url,
                        status = response.status,
                        retries,
                        "Server error, retrying"
                    );
                }
                Ok(response) => {
                    return Some(request.error.render(response.status, &response.reason));
                }
                Err(e) => {
                    warn!(url = %request.target.url, error = %e, "Request failed");
                    return Some(request.error.render(0, e.diagnostic()));
                }
            }
        }
    }
}
