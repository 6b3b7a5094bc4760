//! dns_recon library: DNS reconnaissance for locating non-contiguous IP space
//!
//! Given a domain, the scanner finds its nameservers and SOA, attempts a zone
//! transfer, and otherwise enumerates subdomains from a wordlist. Each address
//! found is expanded to its neighbors, which are reverse-resolved to surface
//! related hosts that no wordlist would name.
//!
//! # Example
//!
//! ```no_run
//! use dns_recon::{run_scan, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     domain: Some("example.com".parse()?),
//!     subdomains: vec!["www".into(), "mail".into()],
//!     ..Default::default()
//! };
//!
//! let report = run_scan(config, &mut std::io::stdout()).await?;
//! println!("{} subdomains, {} nearby hosts", report.subdomains_found, report.nearby_hosts);
//! # Ok(())
//! # }
//! ```
//!
//! The building blocks ([`query`], [`recursive_query`], [`zone_transfer`],
//! [`find_nearby`], the expanders) are generic over the [`DnsResolver`] and
//! [`ZoneTransport`] traits, so they run against any resolver.
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

pub mod config;
pub mod dns;
pub mod domain;
pub mod error_handling;
pub mod expand;
pub mod initialization;
pub mod nearby;
pub mod probe;
pub mod report;
mod run;
pub mod wordlist;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use dns::{
    query, recursive_query, zone_transfer, Answer, DnsResolver, RecordType, ReverseAnswer,
    ZoneData, ZoneTransport,
};
pub use domain::{concatenate_subdomains, DomainName};
pub use expand::{traverse_expander, wide_expander, Expander};
pub use nearby::{find_nearby, NearbyMap};
pub use run::{
    build_context, detect_wildcard, resolve_subdomains, run_scan, scan, scan_domain, scan_range,
    ScanContext, ScanOptions, ScanReport, ScanState, ScanTarget,
};
