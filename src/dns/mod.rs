//! DNS resolution and zone transfer.
//!
//! This module provides the resolution engine's DNS primitives:
//! - `query()` - one lookup, absorbing transient target-server failures
//! - `recursive_query()` - ascent towards the root until something answers
//! - `zone_transfer()` - one AXFR attempt, absorbing refusal and transport failures
//!
//! The network is reached only through the [`DnsResolver`] and
//! [`ZoneTransport`] traits. `hickory-resolver` backs both in production.

mod hickory;
mod records;
mod resolution;
mod zone;

// Re-export public API
pub use hickory::{HickoryResolver, HickoryZoneTransport};
pub use records::{Answer, RecordData, RecordType, ResourceRecord, ReverseAnswer, ZoneData};
pub use resolution::{query, recursive_query, DnsResolver};
pub use zone::{zone_transfer, ZoneTransport};
