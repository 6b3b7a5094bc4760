//! Zone transfer primitive.

use std::net::IpAddr;

use async_trait::async_trait;
use log::debug;

use super::records::ZoneData;
use crate::domain::DomainName;
use crate::error_handling::TransferError;

/// Transport able to request a full zone transfer (AXFR).
#[async_trait]
pub trait ZoneTransport: Send + Sync {
    /// Requests the zone `domain` from `nameserver`.
    async fn transfer(
        &self,
        nameserver: IpAddr,
        domain: &DomainName,
    ) -> Result<ZoneData, TransferError>;
}

/// Attempts one zone transfer.
///
/// Connection failures, premature end of stream, timeouts, malformed
/// responses and explicit refusals all mean the server will not hand out the
/// zone; they yield `None`. There is no retry: refusal is server policy.
///
/// # Arguments
///
/// * `transport` - The zone transfer transport
/// * `nameserver` - Address of the nameserver to ask
/// * `domain` - Zone to request
///
/// # Errors
///
/// Returns the transport's error for any other failure.
pub async fn zone_transfer<T: ZoneTransport + ?Sized>(
    transport: &T,
    nameserver: IpAddr,
    domain: &DomainName,
) -> Result<Option<ZoneData>, TransferError> {
    match transport.transfer(nameserver, domain).await {
        Ok(zone) => Ok(Some(zone)),
        Err(e) if e.is_unavailable() => {
            debug!("Zone transfer of {domain} from {nameserver} unavailable: {}", e.failure);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
