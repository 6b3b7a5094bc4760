//! Scan orchestration.
//!
//! [`run_scan`] is the library entry point: it builds production resources
//! from a [`Config`] and scans the configured target. [`scan`] runs the same
//! flow over caller-supplied resources.

mod finalize;
mod init;
mod resources;
mod task;

use std::io::Write;
use std::time::Instant;

use anyhow::Result;

use crate::config::Config;

pub use init::{build_context, resolve_subdomains, ScanTarget};
pub use resources::{ScanContext, ScanOptions, ScanState};
pub use task::{detect_wildcard, scan_domain, scan_range};

use finalize::finalize_scan;

/// Results of a scan run.
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Domains or ranges scanned
    pub domains_scanned: usize,
    /// Subdomains that resolved to something other than the wildcard
    pub subdomains_found: usize,
    /// Nearby addresses with a PTR record that passed the search filter
    pub nearby_hosts: usize,
    /// Successful zone transfers
    pub zone_transfers: usize,
    /// Elapsed time in seconds
    pub elapsed_seconds: f64,
}

/// Runs a scan with the provided configuration.
///
/// Report lines are written to `out`; progress is logged.
///
/// # Arguments
///
/// * `config` - Target, wordlists, resolver and probe settings
/// * `out` - Destination of the report lines, usually stdout
///
/// # Returns
///
/// A `ScanReport` with summary counts.
///
/// # Errors
///
/// This function will return an error if:
/// - Neither a domain nor a range is configured
/// - A wordlist or nameserver file cannot be read
/// - The DNS resolver cannot be initialized
/// - The domain has no SOA record
///
/// # Example
///
/// ```no_run
/// use dns_recon::{run_scan, Config};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config {
///     domain: Some("example.com".parse()?),
///     ..Default::default()
/// };
/// let report = run_scan(config, &mut std::io::stdout()).await?;
/// println!("Found {} subdomains", report.subdomains_found);
/// # Ok(())
/// # }
/// ```
pub async fn run_scan<W: Write>(config: Config, out: &mut W) -> Result<ScanReport> {
    let target = ScanTarget::from_config(&config)?;
    let ctx = build_context(&config).await?;
    scan(&ctx, &target, out).await
}

/// Scans `target` with the given resources.
///
/// # Errors
///
/// Same as [`scan_domain`] and [`scan_range`].
pub async fn scan<W: Write>(ctx: &ScanContext, target: &ScanTarget, out: &mut W) -> Result<ScanReport> {
    let start_time = Instant::now();
    let mut state = ScanState::new();

    match target {
        ScanTarget::Domain(domain) => scan_domain(ctx, &mut state, domain, out).await?,
        ScanTarget::Range(network) => scan_range(ctx, &mut state, *network, out).await?,
    }
    out.flush()?;

    Ok(finalize_scan(&state, start_time))
}
