//! Record types and answer containers.
//!
//! These types are the resolution engine's view of DNS data. They are
//! independent of the transport so resolvers can be substituted in tests.

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use strum_macros::{Display, EnumIter, EnumString};

use crate::domain::DomainName;

/// Resource record type requested by a query.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum RecordType {
    /// IPv4 address
    A,
    /// IPv6 address
    #[strum(serialize = "AAAA")]
    Aaaa,
    /// Authoritative nameserver
    #[default]
    NS,
    /// Start of authority
    SOA,
    /// Reverse pointer
    PTR,
    /// Canonical name
    CNAME,
    /// Mail exchanger
    MX,
    /// Text
    TXT,
    /// Full zone transfer
    AXFR,
}

/// Parsed record data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    /// IPv4 address
    A(Ipv4Addr),
    /// IPv6 address
    Aaaa(Ipv6Addr),
    /// Nameserver host
    Ns(String),
    /// Start of authority
    Soa {
        /// Primary nameserver
        mname: String,
        /// Responsible mailbox
        rname: String,
        /// Zone serial
        serial: u32,
    },
    /// Reverse pointer target
    Ptr(String),
    /// Canonical name target
    Cname(String),
    /// Mail exchanger
    Mx {
        /// Preference (lower wins)
        preference: u16,
        /// Exchange host
        exchange: String,
    },
    /// Text, with character-strings joined
    Txt(String),
    /// Any type the engine does not interpret
    Other {
        /// Type mnemonic
        record_type: String,
        /// Presentation-format data
        text: String,
    },
}

impl RecordData {
    /// Type mnemonic of this data.
    pub fn type_name(&self) -> String {
        match self {
            RecordData::A(_) => "A".to_string(),
            RecordData::Aaaa(_) => "AAAA".to_string(),
            RecordData::Ns(_) => "NS".to_string(),
            RecordData::Soa { .. } => "SOA".to_string(),
            RecordData::Ptr(_) => "PTR".to_string(),
            RecordData::Cname(_) => "CNAME".to_string(),
            RecordData::Mx { .. } => "MX".to_string(),
            RecordData::Txt(_) => "TXT".to_string(),
            RecordData::Other { record_type, .. } => record_type.clone(),
        }
    }
}

impl fmt::Display for RecordData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordData::A(ip) => write!(f, "{ip}"),
            RecordData::Aaaa(ip) => write!(f, "{ip}"),
            RecordData::Ns(host) | RecordData::Ptr(host) | RecordData::Cname(host) => {
                f.write_str(host)
            }
            RecordData::Soa {
                mname,
                rname,
                serial,
            } => write!(f, "{mname} {rname} {serial}"),
            RecordData::Mx {
                preference,
                exchange,
            } => write!(f, "{preference} {exchange}"),
            RecordData::Txt(text) => write!(f, "\"{text}\""),
            RecordData::Other { text, .. } => f.write_str(text),
        }
    }
}

/// A single resource record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    /// Owner name (text form)
    pub name: String,
    /// Time to live in seconds
    pub ttl: u32,
    /// Record data
    pub data: RecordData,
}

impl ResourceRecord {
    /// Creates a record.
    pub fn new(name: impl Into<String>, ttl: u32, data: RecordData) -> Self {
        Self {
            name: name.into(),
            ttl,
            data,
        }
    }
}

impl fmt::Display for ResourceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} IN {} {}",
            self.name,
            self.ttl,
            self.data.type_name(),
            self.data
        )
    }
}

/// Answer to a forward query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    /// Name that was queried
    pub name: DomainName,
    /// Type that was requested
    pub record_type: RecordType,
    /// Records in the answer section, in wire order
    pub records: Vec<ResourceRecord>,
}

impl Answer {
    /// Creates an answer.
    pub fn new(name: DomainName, record_type: RecordType, records: Vec<ResourceRecord>) -> Self {
        Self {
            name,
            record_type,
            records,
        }
    }

    /// Whether the answer holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// IPv4 addresses from A records, in answer order.
    pub fn ipv4_addresses(&self) -> Vec<Ipv4Addr> {
        self.records
            .iter()
            .filter_map(|r| match r.data {
                RecordData::A(ip) => Some(ip),
                _ => None,
            })
            .collect()
    }

    /// Nameserver hosts from NS records, in answer order.
    pub fn nameservers(&self) -> Vec<String> {
        self.records
            .iter()
            .filter_map(|r| match &r.data {
                RecordData::Ns(host) => Some(host.clone()),
                _ => None,
            })
            .collect()
    }

    /// Primary nameserver (MNAME) of the first SOA record.
    ///
    /// Returns `None` if there is no SOA record or its MNAME does not parse.
    pub fn soa_primary(&self) -> Option<DomainName> {
        self.records.iter().find_map(|r| match &r.data {
            RecordData::Soa { mname, .. } => DomainName::parse(mname).ok(),
            _ => None,
        })
    }
}

/// Answer to a reverse (PTR) lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReverseAnswer {
    /// Address that was looked up
    pub ip: Ipv4Addr,
    /// PTR targets, in answer order
    pub hostnames: Vec<String>,
}

impl ReverseAnswer {
    /// Creates a reverse answer.
    pub fn new(ip: Ipv4Addr, hostnames: Vec<String>) -> Self {
        Self { ip, hostnames }
    }

    /// First PTR target, if any.
    pub fn hostname(&self) -> Option<&str> {
        self.hostnames.first().map(String::as_str)
    }

    /// Whether the lookup returned no names.
    pub fn is_empty(&self) -> bool {
        self.hostnames.is_empty()
    }
}

/// Records obtained through a zone transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneData {
    /// Zone origin
    pub origin: DomainName,
    /// Records in transfer order
    pub records: Vec<ResourceRecord>,
}

impl ZoneData {
    /// Creates zone data.
    pub fn new(origin: DomainName, records: Vec<ResourceRecord>) -> Self {
        Self { origin, records }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the zone holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl fmt::Display for ZoneData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for record in &self.records {
            writeln!(f, "{record}")?;
        }
        Ok(())
    }
}
