//! Forward resolution: the single-query primitive and recursive ascent.
//!
//! The resolver is injected through the [`DnsResolver`] trait so the engine
//! can be driven by the hickory-backed resolver in production and by scripted
//! resolvers in tests.

use std::net::Ipv4Addr;

use async_trait::async_trait;
use log::debug;

use super::records::{Answer, RecordType, ReverseAnswer};
use crate::domain::DomainName;
use crate::error_handling::QueryError;

/// A DNS resolver handle.
///
/// Implementations own their nameserver list, timeout and retry policy. The
/// engine only issues lookups through this trait and never mutates it.
#[async_trait]
pub trait DnsResolver: Send + Sync {
    /// Issues one forward query.
    ///
    /// Returns an error classified by [`crate::error_handling::QueryFailure`]
    /// when the lookup fails, including when the answer is empty.
    async fn lookup(&self, name: &DomainName, record_type: RecordType)
        -> Result<Answer, QueryError>;

    /// Issues one PTR lookup for an IPv4 address.
    async fn reverse_lookup(&self, ip: Ipv4Addr) -> Result<ReverseAnswer, QueryError>;
}

/// Queries one record type for a domain.
///
/// NXDOMAIN, no available nameservers, timeouts and empty answers are
/// treated as "no answer".
///
/// # Arguments
///
/// * `resolver` - The DNS resolver instance
/// * `domain` - The domain to query
/// * `record_type` - The record type to request
///
/// # Returns
///
/// `Some(answer)` on success, `None` if the target gave no usable answer.
///
/// # Errors
///
/// Returns the resolver's error for any failure outside those listed above.
pub async fn query<R: DnsResolver + ?Sized>(
    resolver: &R,
    domain: &DomainName,
    record_type: RecordType,
) -> Result<Option<Answer>, QueryError> {
    match resolver.lookup(domain, record_type).await {
        Ok(answer) => Ok(Some(answer)),
        Err(e) if e.is_transient() => {
            debug!("No {record_type} answer for {domain}: {}", e.failure);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Queries a domain, ascending towards the root until something answers.
///
/// The leftmost label is stripped after each failed query. The root itself
/// is queried last. For `sd1.sd2.example.com.` the order is
/// `sd1.sd2.example.com.`, `sd2.example.com.`, `example.com.`, `com.`, `.`.
///
/// # Arguments
///
/// * `resolver` - The DNS resolver instance
/// * `domain` - The most specific domain to start from
/// * `record_type` - The record type to request
///
/// # Returns
///
/// The answer from the most specific level that responded, or `None` if even
/// the root gave no answer.
///
/// # Errors
///
/// Propagates the first non-transient error from [`query`].
pub async fn recursive_query<R: DnsResolver + ?Sized>(
    resolver: &R,
    domain: &DomainName,
    record_type: RecordType,
) -> Result<Option<Answer>, QueryError> {
    let mut current = Some(domain.to_absolute());
    while let Some(name) = current {
        if let Some(answer) = query(resolver, &name, record_type).await? {
            return Ok(Some(answer));
        }
        debug!("Ascending from {name} for {record_type}");
        current = name.parent();
    }
    Ok(None)
}
