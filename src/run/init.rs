//! Scan initialization.
//!
//! Turns a [`Config`] into a scan target and the resources needed to scan it.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use ipnetwork::Ipv4Network;
use log::info;

use crate::config::{Config, HTTP_TIMEOUT_SECS};
use crate::dns::{HickoryResolver, HickoryZoneTransport};
use crate::domain::DomainName;
use crate::initialization::{init_client, init_resolver};
use crate::wordlist::{default_subdomains, load_nameservers, load_subdomains};

use super::resources::{ScanContext, ScanOptions};

/// What a run scans.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanTarget {
    /// A domain, enumerated through its subdomains
    Domain(DomainName),
    /// Every address of an IPv4 network, reverse-resolved
    Range(Ipv4Network),
}

impl ScanTarget {
    /// Picks the target from configuration. `--range` wins over `--domain`.
    ///
    /// # Errors
    ///
    /// Fails if neither is set.
    pub fn from_config(config: &Config) -> Result<Self> {
        match (&config.range, &config.domain) {
            (Some(network), _) => Ok(ScanTarget::Range(*network)),
            (None, Some(domain)) => Ok(ScanTarget::Domain(domain.to_absolute())),
            (None, None) => bail!("either a domain or a range is required"),
        }
    }
}

/// Subdomains to try: explicit list, then wordlist file, then the bundled list.
///
/// # Errors
///
/// Fails if the wordlist file cannot be read.
pub async fn resolve_subdomains(config: &Config) -> Result<Vec<String>> {
    if !config.subdomains.is_empty() {
        return Ok(config.subdomains.clone());
    }
    match &config.subdomain_file {
        Some(path) => load_subdomains(path)
            .await
            .context("Failed to load subdomain wordlist"),
        None => Ok(default_subdomains()),
    }
}

/// Builds the production scan context from configuration.
///
/// # Errors
///
/// Fails if a wordlist or nameserver file cannot be read, or if the DNS
/// resolver or HTTP client cannot be initialized.
pub async fn build_context(config: &Config) -> Result<ScanContext> {
    let nameservers = match &config.dns_file {
        Some(path) => load_nameservers(path)
            .await
            .context("Failed to load nameserver file")?,
        None => config.dns_servers.clone(),
    };

    let resolver = init_resolver(&nameservers, config.tcp, config.timeout())
        .context("Failed to initialize DNS resolver")?;
    let transport = HickoryZoneTransport::new(config.timeout());

    let client = if config.connect {
        Some(
            init_client(Duration::from_secs(HTTP_TIMEOUT_SECS))
                .context("Failed to initialize HTTP client")?,
        )
    } else {
        None
    };

    let subdomains = resolve_subdomains(config).await?;
    info!("Loaded {} subdomains", subdomains.len());

    Ok(ScanContext::new(
        Box::new(HickoryResolver::new(resolver)),
        Box::new(transport),
        client,
        ScanOptions::from_config(config, subdomains),
    ))
}
