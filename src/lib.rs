//! # canvas-bulk
//!
//! Bulk gradebook operations for Canvas LMS.
//!
//! Every bulk import runs the same pipeline: a spreadsheet is checked by the
//! row validator, turned into one request per non-blank cell, confirmed by
//! the user, sent in throttled chunks, and summarised with a failure log.
//! Reads needed before an import (rosters, assignments, submissions) go
//! through the paginated reader.
//!
//! ```rust,no_run
//! use canvas_bulk::core::dispatch::LogProgress;
//! use canvas_bulk::core::table::Table;
//! use canvas_bulk::workflows::{BulkContext, comments};
//! use canvas_bulk::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default().with_env()?;
//!     config.validate()?;
//!     let ctx = BulkContext::from_config(&config)?;
//!
//!     let table = Table::from_path("comments.csv")?;
//!     let plan = comments::plan_comment_import(&ctx, 1234, &table)?;
//!     let report = ctx.execute(&plan, &mut LogProgress::new("comments")).await?;
//!     println!("{}", report);
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod canvas;
pub mod cli;
pub mod config;
pub mod core;
pub mod utils;
pub mod workflows;

pub use config::Config;
pub use utils::error::{BulkError, Result};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    pub version: &'static str,
    /// Short git hash, or `unknown` outside a checkout
    pub git_hash: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            git_hash: env!("CANVAS_BULK_GIT_HASH"),
        }
    }
}

pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
