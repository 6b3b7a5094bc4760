//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use ipnetwork::Ipv4Network;

use crate::config::constants::{DEFAULT_TRAVERSE, DNS_TIMEOUT_SECS, HTTP_PORT};
use crate::domain::DomainName;
use crate::expand::Expander;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Scan configuration.
///
/// Parsed from the command line by the binary, or built programmatically.
///
/// # Examples
///
/// ```no_run
/// use dns_recon::Config;
///
/// let config = Config {
///     domain: Some("example.com".parse().unwrap()),
///     subdomains: vec!["www".into(), "mail".into()],
///     traverse: 2,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "dns_recon",
    version,
    about = "A DNS reconnaissance tool for locating non-contiguous IP space."
)]
pub struct Config {
    /// Domain name to test
    #[arg(long, required_unless_present = "range")]
    pub domain: Option<DomainName>,

    /// Attempt HTTP connection to non-RFC 1918 hosts
    #[arg(long)]
    pub connect: bool,

    /// Scan entire class C of discovered records
    #[arg(long)]
    pub wide: bool,

    /// Scan IPs near discovered records, this won't enter adjacent class C's
    #[arg(long, default_value_t = DEFAULT_TRAVERSE)]
    pub traverse: u32,

    /// Filter on these domains when expanding lookup
    #[arg(long, num_args = 1..)]
    pub search: Vec<String>,

    /// Scan an internal IP range, use CIDR notation
    #[arg(long)]
    pub range: Option<Ipv4Network>,

    /// Time to wait between lookups, in seconds
    #[arg(long, default_value_t = 0.0)]
    pub delay: f64,

    /// Use these subdomains
    #[arg(long, num_args = 1.., conflicts_with = "subdomain_file")]
    pub subdomains: Vec<String>,

    /// Use subdomains specified in this file (one per line)
    #[arg(long)]
    pub subdomain_file: Option<PathBuf>,

    /// Use these DNS servers
    #[arg(long, num_args = 1.., conflicts_with = "dns_file")]
    pub dns_servers: Vec<IpAddr>,

    /// Use DNS servers specified in this file (one per line)
    #[arg(long)]
    pub dns_file: Option<PathBuf>,

    /// Use TCP instead of UDP
    #[arg(long)]
    pub tcp: bool,

    /// Per-query timeout in seconds
    #[arg(long, default_value_t = DNS_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Port used by the HTTP connection probe
    #[arg(long, default_value_t = HTTP_PORT)]
    pub http_port: u16,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value = "plain")]
    pub log_format: LogFormat,
}

impl Config {
    /// Expansion strategy implied by `--wide` / `--traverse`.
    pub fn expander(&self) -> Expander {
        if self.wide {
            Expander::Wide
        } else {
            Expander::Traverse(self.traverse)
        }
    }

    /// Per-query timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            domain: None,
            connect: false,
            wide: false,
            traverse: DEFAULT_TRAVERSE,
            search: Vec::new(),
            range: None,
            delay: 0.0,
            subdomains: Vec::new(),
            subdomain_file: None,
            dns_servers: Vec::new(),
            dns_file: None,
            tcp: false,
            timeout_seconds: DNS_TIMEOUT_SECS,
            http_port: HTTP_PORT,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}
