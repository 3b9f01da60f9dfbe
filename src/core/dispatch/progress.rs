//! Progress reporting

use tracing::info;

/// Receives dispatch progress as a percentage in `0.0..=100.0`
pub trait ProgressSink: Send {
    fn report(&mut self, percent: f64);
}

impl<F: FnMut(f64) + Send> ProgressSink for F {
    fn report(&mut self, percent: f64) {
        self(percent)
    }
}

/// Logs each progress update through `tracing`
#[derive(Debug, Clone)]
pub struct LogProgress {
    label: String,
}

impl LogProgress {
    pub fn new<S: Into<String>>(label: S) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl ProgressSink for LogProgress {
    fn report(&mut self, percent: f64) {
        if percent >= 100.0 {
            info!("{}: done", self.label);
        } else {
            info!("{}: {:.0}%", self.label, percent);
        }
    }
}
