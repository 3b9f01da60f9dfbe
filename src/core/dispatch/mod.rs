//! Chunked, pipelined request dispatch
//!
//! Requests start in chunks of `chunk_size`, one chunk every `chunk_delay`,
//! whether or not the previous chunk has finished. Every failure becomes one
//! line in the [`DispatchOutcome`].

mod config;
mod dispatcher;
mod progress;

pub use config::DispatchConfig;
pub use dispatcher::{ChunkedDispatcher, DispatchOutcome};
pub use progress::{LogProgress, ProgressSink};
