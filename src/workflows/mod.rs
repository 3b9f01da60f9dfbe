//! Bulk operations built on the core pipeline
//!
//! Import workflows are split in two: a `plan_*` function reads Canvas and
//! builds every request, then [`BulkContext::execute`] dispatches the plan
//! once the user has confirmed it.

pub mod attendance;
pub mod columns;
pub mod comments;
pub mod copy_dates;
pub mod rubric_export;
pub mod rubric_import;

use crate::canvas::CanvasApi;
use crate::config::{BulkConfig, Config, DispatchSettings, ReportConfig};
use crate::core::dispatch::{ChunkedDispatcher, DispatchConfig, ProgressSink};
use crate::core::report::{OutcomeReport, OutcomeReporter};
use crate::core::request::PendingRequest;
use crate::core::transport::{HttpTransport, Transport};
use crate::core::validation::{Notice, enforce_request_cap};
use crate::utils::error::Result;
use tracing::info;

/// Everything a bulk import will send, plus what the user should see first
#[derive(Debug, Clone)]
pub struct ImportPlan {
    pub requests: Vec<PendingRequest>,
    pub notices: Vec<Notice>,
    /// Question asked before anything is sent
    pub confirmation: String,
    /// What the requests carry, e.g. `"comments"`
    pub noun: String,
    pub next_step: Option<String>,
}

impl ImportPlan {
    /// Build a plan, rejecting empty batches and batches above `max_requests`
    pub fn new<S: Into<String>>(
        requests: Vec<PendingRequest>,
        notices: Vec<Notice>,
        noun: S,
        max_requests: usize,
    ) -> Result<Self> {
        enforce_request_cap(requests.len(), max_requests)?;
        let noun = noun.into();
        let confirmation = format!(
            "You are about to post {} {}. This cannot be undone. Are you sure you wish to proceed?",
            requests.len(),
            noun
        );
        Ok(Self {
            requests,
            notices,
            confirmation,
            noun,
            next_step: None,
        })
    }

    pub fn with_next_step<S: Into<String>>(mut self, step: S) -> Self {
        self.next_step = Some(step.into());
        self
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

/// Canvas access plus the settings every workflow needs
pub struct BulkContext<T: Transport> {
    pub api: CanvasApi<T>,
    pub dispatch: DispatchSettings,
    pub report: ReportConfig,
}

impl BulkContext<HttpTransport> {
    /// Context talking to the configured Canvas instance
    pub fn from_config(config: &Config) -> Result<Self> {
        let transport = HttpTransport::new(config.canvas())?;
        Ok(Self::new(transport, &config.bulk))
    }
}

impl<T: Transport> BulkContext<T> {
    pub fn new(transport: T, config: &BulkConfig) -> Self {
        Self {
            api: CanvasApi::new(transport),
            dispatch: config.dispatch.clone(),
            report: config.report.clone(),
        }
    }

    pub fn max_requests(&self) -> usize {
        self.dispatch.max_requests
    }

    /// Dispatch a confirmed plan and summarise the outcome
    pub async fn execute(
        &self,
        plan: &ImportPlan,
        progress: &mut dyn ProgressSink,
    ) -> Result<OutcomeReport> {
        info!(requests = plan.len(), noun = %plan.noun, "Starting import");
        let dispatcher =
            ChunkedDispatcher::new(self.api.transport(), DispatchConfig::from(&self.dispatch));
        let outcome = dispatcher.dispatch(&plan.requests, progress).await;

        let mut reporter = OutcomeReporter::new(&self.report, plan.noun.clone());
        if let Some(step) = &plan.next_step {
            reporter = reporter.with_next_step(step.clone());
        }
        reporter.report(&outcome).await
    }
}
