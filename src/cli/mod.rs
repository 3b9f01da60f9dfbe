//! Command-line interface
//!
//! Arguments are parsed with `clap`; [`run`] loads configuration, builds a
//! [`BulkContext`](crate::workflows::BulkContext) and drives one workflow.

mod commands;
mod console;

pub use commands::execute;
pub use console::Console;

use crate::config::Config;
use crate::utils::error::Result;
use crate::workflows::BulkContext;
use crate::workflows::copy_dates::OffsetUnit;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("CANVAS_BULK_GIT_HASH"),
    ")"
);

#[derive(Debug, Parser)]
#[command(name = "canvas-bulk", version, long_version = LONG_VERSION)]
#[command(about = "Bulk gradebook operations for Canvas LMS")]
pub struct Cli {
    /// YAML configuration file
    #[arg(short, long, global = true, env = "CANVAS_BULK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Answer yes to every confirmation prompt
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Requests sent per chunk
    #[arg(long, global = true)]
    pub chunk_size: Option<usize>,

    /// Milliseconds between chunk starts
    #[arg(long, global = true)]
    pub chunk_delay_ms: Option<u64>,

    /// Directory for exports and error logs
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Post submission comments from a spreadsheet
    ImportComments {
        #[arg(long)]
        course: u64,
        /// CSV with a "SIS User ID" column and one "Name (assignment id)" column per assignment
        file: PathBuf,
    },

    /// Import rubric scores for one assignment
    ImportRubric {
        #[arg(long)]
        course: u64,
        #[arg(long)]
        assignment: u64,
        /// CSV in the rubric export layout
        file: PathBuf,
    },

    /// Export rubric scores for one assignment to CSV
    ExportRubric {
        #[arg(long)]
        course: u64,
        #[arg(long)]
        assignment: u64,
    },

    /// Grade attendance from a Zoom participants export
    ImportAttendance {
        #[arg(long)]
        course: u64,
        file: PathBuf,
        /// Assignment group holding attendance assignments
        #[arg(long)]
        group: u64,
        /// Assignment name; defaults to the meeting date
        #[arg(long)]
        name: Option<String>,
        #[arg(long, default_value_t = 1.0)]
        points: f64,
        /// Minutes required to be counted present
        #[arg(long, default_value_t = 1.0)]
        min_minutes: f64,
        /// Add to an existing assignment with the same name
        #[arg(long)]
        overwrite: bool,
    },

    /// Copy dates and overrides from one assignment to another
    CopyDates {
        #[arg(long)]
        course: u64,
        #[arg(long)]
        source: u64,
        #[arg(long)]
        dest: u64,
        #[arg(long, allow_negative_numbers = true, default_value_t = 0)]
        offset: i64,
        /// days or weeks
        #[arg(long, default_value = "days")]
        unit: OffsetUnit,
    },

    /// Add a custom gradebook column
    AddColumn {
        #[arg(long)]
        course: u64,
        title: String,
    },

    /// Remove a custom gradebook column by title
    RemoveColumn {
        #[arg(long)]
        course: u64,
        title: String,
    },
}

impl Cli {
    /// Load the file (if any), overlay the environment, then flags
    pub async fn load_config(&self) -> Result<Config> {
        let config = match &self.config {
            Some(path) => Config::from_file(path).await?,
            None => Config::default(),
        };
        let mut config = config.with_env()?;
        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(size) = self.chunk_size {
            config.bulk.dispatch.chunk_size = size;
        }
        if let Some(delay) = self.chunk_delay_ms {
            config.bulk.dispatch.chunk_delay_ms = delay;
        }
        if let Some(dir) = &self.output_dir {
            config.bulk.report.output_dir = dir.clone();
        }
    }
}

/// Run one command against the configured Canvas instance.
///
/// Returns `false` when the command finished but some requests failed.
pub async fn run(cli: Cli) -> Result<bool> {
    let config = cli.load_config().await?;
    debug!(base_url = %config.canvas().base_url, "Configuration loaded");
    let ctx = BulkContext::from_config(&config)?;
    let mut console = Console::stdio(cli.yes);
    execute(&ctx, cli.command, &mut console).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_import_comments() {
        let cli = Cli::try_parse_from([
            "canvas-bulk",
            "import-comments",
            "--course",
            "12",
            "comments.csv",
            "--yes",
        ])
        .unwrap();
        assert!(cli.yes);
        assert_eq!(
            cli.command,
            Command::ImportComments {
                course: 12,
                file: PathBuf::from("comments.csv"),
            }
        );
    }

    #[test]
    fn test_parse_copy_dates_negative_offset() {
        let cli = Cli::try_parse_from([
            "canvas-bulk",
            "copy-dates",
            "--course=1",
            "--source=2",
            "--dest=3",
            "--offset",
            "-2",
            "--unit",
            "weeks",
        ])
        .unwrap();
        match cli.command {
            Command::CopyDates { offset, unit, .. } => {
                assert_eq!(offset, -2);
                assert_eq!(unit, OffsetUnit::Weeks);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_unit() {
        assert!(
            Cli::try_parse_from([
                "canvas-bulk",
                "copy-dates",
                "--course=1",
                "--source=2",
                "--dest=3",
                "--unit=months",
            ])
            .is_err()
        );
    }

    #[test]
    fn test_attendance_defaults() {
        let cli = Cli::try_parse_from([
            "canvas-bulk",
            "import-attendance",
            "--course=1",
            "--group=9",
            "zoom.csv",
        ])
        .unwrap();
        match cli.command {
            Command::ImportAttendance {
                points,
                min_minutes,
                overwrite,
                name,
                ..
            } => {
                assert_eq!(points, 1.0);
                assert_eq!(min_minutes, 1.0);
                assert!(!overwrite);
                assert!(name.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_flag_overrides() {
        let cli = Cli::try_parse_from([
            "canvas-bulk",
            "--chunk-size=5",
            "--chunk-delay-ms=250",
            "--output-dir=/tmp/out",
            "add-column",
            "--course=1",
            "Notes",
        ])
        .unwrap();
        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.dispatch().chunk_size, 5);
        assert_eq!(config.dispatch().chunk_delay_ms, 250);
        assert_eq!(config.report().output_dir, PathBuf::from("/tmp/out"));
    }
}
