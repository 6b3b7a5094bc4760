//! Error type definitions.
//!
//! This module defines the error types used throughout the application and the
//! failure classifications that decide which DNS errors are absorbed as
//! "no answer" and which propagate to the caller.

use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

use crate::dns::RecordType;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// Error initializing the DNS resolver (system configuration unreadable, etc.).
    #[error("DNS resolver initialization error: {0}")]
    DnsResolverError(String),
}

/// Malformed domain name input.
///
/// These are caller errors and are never absorbed by the resolution engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainNameError {
    /// The input text was empty.
    #[error("empty domain name")]
    Empty,

    /// Two consecutive dots (or a leading dot) produced an empty label.
    #[error("empty label in domain name '{0}'")]
    EmptyLabel(String),

    /// A label exceeded 63 octets.
    #[error("label '{label}' is {len} octets long (max 63)")]
    LabelTooLong {
        /// The offending label
        label: String,
        /// Its length in octets
        len: usize,
    },

    /// The whole name exceeded 255 octets in wire form.
    #[error("domain name is {0} octets long in wire form (max 255)")]
    NameTooLong(usize),
}

/// Classification of a failed DNS query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum QueryFailure {
    /// NXDOMAIN
    NxDomain,
    /// Every configured nameserver failed (SERVFAIL, REFUSED, no connection)
    NoNameservers,
    /// The query timed out
    Timeout,
    /// NOERROR with an empty answer section
    NoAnswer,
    /// Anything else: configuration or programming errors
    Other,
}

impl QueryFailure {
    /// Whether this failure is a target-server condition that `query` absorbs.
    pub fn is_transient(self) -> bool {
        !matches!(self, QueryFailure::Other)
    }

    /// Human-readable description.
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryFailure::NxDomain => "name does not exist",
            QueryFailure::NoNameservers => "no nameservers available",
            QueryFailure::Timeout => "query timed out",
            QueryFailure::NoAnswer => "no records in answer",
            QueryFailure::Other => "resolution error",
        }
    }
}

impl std::fmt::Display for QueryFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed DNS lookup, as reported by a [`crate::dns::DnsResolver`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{failure} for {name} ({record_type}): {detail}")]
pub struct QueryError {
    /// Name that was queried (text form)
    pub name: String,
    /// Record type that was requested
    pub record_type: RecordType,
    /// Failure classification
    pub failure: QueryFailure,
    /// Underlying error message
    pub detail: String,
}

impl QueryError {
    /// Creates a new query error.
    pub fn new(
        name: impl Into<String>,
        record_type: RecordType,
        failure: QueryFailure,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            record_type,
            failure,
            detail: detail.into(),
        }
    }

    /// Whether `query` treats this error as "no answer".
    pub fn is_transient(&self) -> bool {
        self.failure.is_transient()
    }
}

/// Classification of a failed zone transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum TransferFailure {
    /// TCP connection could not be established or was reset
    Connection,
    /// The server closed the stream mid-transfer
    Eof,
    /// The transfer timed out
    Timeout,
    /// The response could not be parsed
    Malformed,
    /// The server answered but refused (REFUSED / NOTAUTH / empty transfer)
    Refused,
    /// Anything else: configuration or programming errors
    Other,
}

impl TransferFailure {
    /// Whether this failure means "this server does not permit/support AXFR".
    pub fn is_unavailable(self) -> bool {
        !matches!(self, TransferFailure::Other)
    }

    /// Human-readable description.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferFailure::Connection => "connection failed",
            TransferFailure::Eof => "unexpected end of stream",
            TransferFailure::Timeout => "transfer timed out",
            TransferFailure::Malformed => "malformed response",
            TransferFailure::Refused => "transfer refused",
            TransferFailure::Other => "transfer error",
        }
    }
}

impl std::fmt::Display for TransferFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed zone transfer, as reported by a [`crate::dns::ZoneTransport`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("zone transfer of {zone} from {nameserver}: {failure}: {detail}")]
pub struct TransferError {
    /// Zone origin (text form)
    pub zone: String,
    /// Nameserver address (text form)
    pub nameserver: String,
    /// Failure classification
    pub failure: TransferFailure,
    /// Underlying error message
    pub detail: String,
}

impl TransferError {
    /// Creates a new transfer error.
    pub fn new(
        zone: impl Into<String>,
        nameserver: impl Into<String>,
        failure: TransferFailure,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            zone: zone.into(),
            nameserver: nameserver.into(),
            failure,
            detail: detail.into(),
        }
    }

    /// Whether `zone_transfer` treats this error as "unavailable".
    pub fn is_unavailable(&self) -> bool {
        self.failure.is_unavailable()
    }
}

/// Errors reading subdomain or nameserver lists.
#[derive(Error, Debug)]
pub enum WordlistError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A nameserver line was not an IP address.
    #[error("{}:{line}: '{value}' is not an IP address", path.display())]
    InvalidAddress {
        /// File path
        path: PathBuf,
        /// 1-based line number
        line: usize,
        /// Offending text
        value: String,
    },
}

/// Events counted during a scan.
///
/// Absorbed failures never surface as errors, so these counters are the only
/// record of how many lookups came back empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ScanEvent {
    /// A subdomain resolved to at least one IPv4 address
    SubdomainResolved,
    /// A subdomain query returned no answer
    SubdomainMissing,
    /// A subdomain resolved to exactly the wildcard address set
    WildcardMatch,
    /// A nearby IP reverse-resolved and passed the filter
    NearbyResolved,
    /// A nearby IP had no PTR record or was filtered out
    NearbyUnresolved,
    /// An AXFR returned the zone
    ZoneTransferSucceeded,
    /// An AXFR was refused or failed
    ZoneTransferFailed,
    /// An HTTP HEAD probe returned headers
    HttpProbeSucceeded,
    /// An HTTP HEAD probe failed
    HttpProbeFailed,
}

impl ScanEvent {
    /// Human-readable description.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanEvent::SubdomainResolved => "subdomains resolved",
            ScanEvent::SubdomainMissing => "subdomains missing",
            ScanEvent::WildcardMatch => "wildcard matches skipped",
            ScanEvent::NearbyResolved => "nearby hosts found",
            ScanEvent::NearbyUnresolved => "nearby addresses without a usable PTR",
            ScanEvent::ZoneTransferSucceeded => "zone transfers succeeded",
            ScanEvent::ZoneTransferFailed => "zone transfers failed",
            ScanEvent::HttpProbeSucceeded => "HTTP probes answered",
            ScanEvent::HttpProbeFailed => "HTTP probes failed",
        }
    }
}

impl std::fmt::Display for ScanEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
