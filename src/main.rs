//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `dns_recon` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Exit status on fatal errors
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use dns_recon::initialization::init_logger_with;
use dns_recon::{run_scan, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    let mut stdout = std::io::stdout().lock();
    match run_scan(config, &mut stdout).await {
        Ok(report) => {
            log::info!(
                "Scanned {} target{} in {:.1}s",
                report.domains_scanned,
                if report.domains_scanned == 1 { "" } else { "s" },
                report.elapsed_seconds
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("dns_recon error: {:#}", e);
            process::exit(1);
        }
    }
}
