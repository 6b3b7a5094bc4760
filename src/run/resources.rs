//! Scan resources and state.
//!
//! [`ScanContext`] holds what a scan reads (network handles and options);
//! [`ScanState`] holds what it accumulates.

use std::time::Duration;

use crate::config::Config;
use crate::dns::{DnsResolver, ZoneTransport};
use crate::error_handling::ScanStats;
use crate::expand::Expander;
use crate::nearby::{SearchFilter, VisitedIps};

/// Options that shape a domain scan.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Subdomain labels to try, most likely first
    pub subdomains: Vec<String>,
    /// Neighborhood of each discovered address
    pub expander: Expander,
    /// Filter applied to nearby reverse lookups
    pub search: SearchFilter,
    /// Send an HTTP HEAD to each public address found
    pub connect: bool,
    /// Port of the HTTP probe
    pub http_port: u16,
    /// Pause after each resolved subdomain
    pub delay: Option<Duration>,
}

impl ScanOptions {
    /// Derives scan options from configuration and a resolved subdomain list.
    ///
    /// A negative, zero or non-finite delay disables the pause.
    pub fn from_config(config: &Config, subdomains: Vec<String>) -> Self {
        Self {
            subdomains,
            expander: config.expander(),
            search: SearchFilter::new(config.search.clone()),
            connect: config.connect,
            http_port: config.http_port,
            delay: Duration::try_from_secs_f64(config.delay)
                .ok()
                .filter(|d| !d.is_zero()),
        }
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            subdomains: Vec::new(),
            expander: Expander::default(),
            search: SearchFilter::default(),
            connect: false,
            http_port: crate::config::HTTP_PORT,
            delay: None,
        }
    }
}

/// Read-only handles shared by every step of a scan.
pub struct ScanContext {
    /// Forward and reverse lookups
    pub resolver: Box<dyn DnsResolver>,
    /// AXFR attempts
    pub transport: Box<dyn ZoneTransport>,
    /// HTTP client, present only when probing is enabled
    pub client: Option<reqwest::Client>,
    /// Scan options
    pub options: ScanOptions,
}

impl ScanContext {
    /// Bundles scan handles.
    pub fn new(
        resolver: Box<dyn DnsResolver>,
        transport: Box<dyn ZoneTransport>,
        client: Option<reqwest::Client>,
        options: ScanOptions,
    ) -> Self {
        Self {
            resolver,
            transport,
            client,
            options,
        }
    }
}

/// Mutable state carried across the domains and subdomains of one run.
#[derive(Debug, Default)]
pub struct ScanState {
    /// Addresses already reverse-resolved
    pub visited: VisitedIps,
    /// Event counters
    pub stats: ScanStats,
    /// Targets scanned so far
    pub domains_scanned: usize,
}

impl ScanState {
    /// Creates empty state.
    pub fn new() -> Self {
        Self::default()
    }
}
