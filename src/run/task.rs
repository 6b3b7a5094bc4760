//! Per-target scan steps.
//!
//! A domain scan walks NS, SOA, zone transfer, wildcard detection and then
//! the subdomain list, printing each result as soon as it is known. A range
//! scan reverse-resolves every address of a network.

use std::collections::HashSet;
use std::io::Write;
use std::net::{IpAddr, Ipv4Addr};

use anyhow::{bail, Result};
use ipnetwork::Ipv4Network;
use log::{debug, info, warn};
use rand::Rng;

use crate::config::WILDCARD_LABEL_RANGE;
use crate::dns::{query, recursive_query, zone_transfer, DnsResolver, RecordType};
use crate::domain::{concatenate_subdomains, DomainName};
use crate::error_handling::ScanEvent;
use crate::nearby::{find_nearby, NearbyMap};
use crate::probe::{head_request, is_probe_target};
use crate::report;

use super::resources::{ScanContext, ScanState};

/// Detects wildcard A records under `domain`.
///
/// Queries a random 11-digit label that is vanishingly unlikely to exist.
///
/// # Returns
///
/// The addresses the random name resolved to, or `None` if it did not resolve.
///
/// # Errors
///
/// Propagates query errors that are not target-server conditions.
pub async fn detect_wildcard<R: DnsResolver + ?Sized>(
    resolver: &R,
    domain: &DomainName,
) -> Result<Option<Vec<Ipv4Addr>>> {
    let label = rand::rng().random_range(WILDCARD_LABEL_RANGE).to_string();
    wildcard_addresses(resolver, domain, &label).await
}

pub(crate) async fn wildcard_addresses<R: DnsResolver + ?Sized>(
    resolver: &R,
    domain: &DomainName,
    label: &str,
) -> Result<Option<Vec<Ipv4Addr>>> {
    let probe = concatenate_subdomains(domain, &[label])?;
    let answer = query(resolver, &probe, RecordType::A).await?;
    Ok(answer
        .map(|answer| answer.ipv4_addresses())
        .filter(|ips| !ips.is_empty()))
}

/// Scans one domain and prints every finding to `out`.
///
/// # Arguments
///
/// * `ctx` - Resolver, transport, HTTP client and options
/// * `state` - Visited addresses and counters, shared across targets
/// * `domain` - The domain to scan
/// * `out` - Destination of the report lines
///
/// # Errors
///
/// Fails if no SOA record can be found for the domain or any parent, if a
/// lookup fails for a reason other than a target-server condition, or if
/// writing to `out` fails.
pub async fn scan_domain<W: Write>(
    ctx: &ScanContext,
    state: &mut ScanState,
    domain: &DomainName,
    out: &mut W,
) -> Result<()> {
    let resolver = ctx.resolver.as_ref();
    let domain = domain.to_absolute();
    info!("Scanning {domain}");
    state.domains_scanned += 1;

    let nameservers = recursive_query(resolver, &domain, RecordType::NS)
        .await?
        .map(|answer| answer.nameservers());
    report::print_nameservers(out, nameservers.as_deref())?;

    let soa = recursive_query(resolver, &domain, RecordType::SOA).await?;
    let Some(mname) = soa.and_then(|answer| answer.soa_primary()) else {
        report::print_soa(out, None)?;
        bail!("Failed to look up NS/SOA for {domain}: domain does not exist");
    };
    let primary = query(resolver, &mname, RecordType::A)
        .await?
        .and_then(|answer| answer.ipv4_addresses().first().copied());
    report::print_soa(out, Some((&mname, primary)))?;

    let zone = match primary {
        Some(ip) => zone_transfer(ctx.transport.as_ref(), IpAddr::V4(ip), &domain).await?,
        None => None,
    };
    report::print_zone(out, zone.as_ref())?;
    if let Some(zone) = zone {
        info!("Zone transfer of {domain} returned {} records", zone.len());
        state.stats.increment(ScanEvent::ZoneTransferSucceeded);
        return Ok(());
    }
    state.stats.increment(ScanEvent::ZoneTransferFailed);

    let wildcard = detect_wildcard(resolver, &domain).await?;
    report::print_wildcard(out, wildcard.as_deref())?;
    let wildcard: HashSet<Ipv4Addr> = wildcard.unwrap_or_default().into_iter().collect();

    for subdomain in &ctx.options.subdomains {
        let url = match concatenate_subdomains(&domain, &[subdomain]) {
            Ok(url) => url,
            Err(e) => {
                warn!("Skipping subdomain '{subdomain}': {e}");
                continue;
            }
        };

        let ips = query(resolver, &url, RecordType::A)
            .await?
            .map(|answer| answer.ipv4_addresses())
            .unwrap_or_default();
        let Some(&ip) = ips.first() else {
            state.stats.increment(ScanEvent::SubdomainMissing);
            continue;
        };
        if ips.iter().copied().collect::<HashSet<_>>() == wildcard {
            debug!("{url} matches the wildcard records, skipping");
            state.stats.increment(ScanEvent::WildcardMatch);
            continue;
        }
        state.stats.increment(ScanEvent::SubdomainResolved);

        let headers = probe_http(ctx, state, &url, ip).await;

        let candidates = ctx.options.expander.expand(ip);
        let unvisited = state.visited.unvisited(candidates);
        let nearby = reverse_scan(ctx, state, unvisited).await;

        report::print_subdomain_result(out, &url, ip, headers.as_deref(), Some(&nearby))?;

        if let Some(delay) = ctx.options.delay {
            tokio::time::sleep(delay).await;
        }
    }

    Ok(())
}

/// Reverse-resolves every address of `network` and prints the hosts found.
///
/// # Errors
///
/// Fails only if writing to `out` fails.
pub async fn scan_range<W: Write>(
    ctx: &ScanContext,
    state: &mut ScanState,
    network: Ipv4Network,
    out: &mut W,
) -> Result<()> {
    info!("Scanning {network} ({} addresses)", network.size());
    state.domains_scanned += 1;

    let unvisited = state.visited.unvisited(network.iter());
    let nearby = reverse_scan(ctx, state, unvisited).await;
    report::print_nearby(out, &nearby)?;
    Ok(())
}

async fn reverse_scan(ctx: &ScanContext, state: &ScanState, ips: Vec<Ipv4Addr>) -> NearbyMap {
    let probed = ips.len();
    let search = &ctx.options.search;
    let nearby = find_nearby(ctx.resolver.as_ref(), ips, |answer| search.accepts(answer)).await;
    state.stats.add(ScanEvent::NearbyResolved, nearby.len());
    state
        .stats
        .add(ScanEvent::NearbyUnresolved, probed.saturating_sub(nearby.len()));
    nearby
}

async fn probe_http(
    ctx: &ScanContext,
    state: &ScanState,
    url: &DomainName,
    ip: Ipv4Addr,
) -> Option<Vec<(String, String)>> {
    if !ctx.options.connect || !is_probe_target(ip) {
        return None;
    }
    let client = ctx.client.as_ref()?;
    let host = url.to_string();
    let headers = head_request(client, ip, ctx.options.http_port, host.trim_end_matches('.')).await;
    let event = if headers.is_some() {
        ScanEvent::HttpProbeSucceeded
    } else {
        ScanEvent::HttpProbeFailed
    };
    state.stats.increment(event);
    headers
}
