//! Nearby host correlation.
//!
//! Maps expanded addresses back to hostnames with reverse lookups, so hosts
//! that share a subnet with a discovered subdomain surface even when their
//! names never appear in a wordlist.

mod map;
mod visited;

use std::net::Ipv4Addr;

use log::debug;

use crate::dns::{DnsResolver, ReverseAnswer};

pub use map::NearbyMap;
pub use visited::VisitedIps;

/// Reverse-resolves one address.
///
/// Any lookup failure, and an answer without names, yields `None`.
pub async fn reverse_query<R: DnsResolver + ?Sized>(
    resolver: &R,
    ip: Ipv4Addr,
) -> Option<ReverseAnswer> {
    match resolver.reverse_lookup(ip).await {
        Ok(answer) if !answer.is_empty() => Some(answer),
        Ok(_) => None,
        Err(e) => {
            debug!("Reverse lookup of {ip} failed: {e}");
            None
        }
    }
}

/// Filter that keeps every reverse lookup result.
pub fn accept_all(_answer: &ReverseAnswer) -> bool {
    true
}

/// Reverse-resolves a sequence of addresses.
///
/// Addresses are probed one at a time, in input order. Addresses whose lookup
/// fails are skipped, as are results rejected by `filter`.
///
/// # Arguments
///
/// * `resolver` - The DNS resolver instance
/// * `ips` - Candidate addresses
/// * `filter` - Predicate over each successful lookup; use [`accept_all`] to keep everything
///
/// # Returns
///
/// A map from each kept address (text form) to its lookup result, in probe order.
pub async fn find_nearby<R, I, F>(resolver: &R, ips: I, filter: F) -> NearbyMap
where
    R: DnsResolver + ?Sized,
    I: IntoIterator<Item = Ipv4Addr>,
    F: Fn(&ReverseAnswer) -> bool,
{
    let mut nearby = NearbyMap::new();
    for ip in ips {
        let Some(answer) = reverse_query(resolver, ip).await else {
            continue;
        };
        if filter(&answer) {
            nearby.insert(ip.to_string(), answer);
        }
    }
    nearby
}

/// Keeps reverse results whose primary hostname contains any search term.
///
/// An empty term list keeps everything.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    terms: Vec<String>,
}

impl SearchFilter {
    /// Creates a filter from search terms.
    pub fn new(terms: Vec<String>) -> Self {
        Self { terms }
    }

    /// Whether `answer` passes the filter.
    pub fn accepts(&self, answer: &ReverseAnswer) -> bool {
        if self.terms.is_empty() {
            return true;
        }
        let Some(hostname) = answer.hostname() else {
            return false;
        };
        self.terms.iter().any(|term| hostname.contains(term.as_str()))
    }
}
