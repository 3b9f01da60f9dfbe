//! canvas-bulk command-line entry point

use canvas_bulk::cli::{self, Cli};
use canvas_bulk::utils::logging::init_tracing;
use clap::Parser;
use std::process::ExitCode;
use tracing::debug;

#[tokio::main]
async fn main() -> ExitCode {
    let loaded_env = dotenvy::dotenv().is_ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if loaded_env {
        debug!("Loaded environment from .env");
    }

    match cli::run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            // Display, not Debug, so multi-line notices stay readable
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
