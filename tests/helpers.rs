// Shared test helpers: in-memory DNS and zone transfer fakes.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use async_trait::async_trait;
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::{Arc, Mutex};

use dns_recon::dns::{RecordData, ResourceRecord};
use dns_recon::error_handling::{QueryError, QueryFailure, TransferError, TransferFailure};
use dns_recon::{Answer, DnsResolver, DomainName, RecordType, ReverseAnswer, ZoneData, ZoneTransport};

/// Forward queries made by a [`FakeDns`], in order.
pub type CallLog = Arc<Mutex<Vec<(String, RecordType)>>>;

/// Resolver answering from in-memory tables.
///
/// Unknown names fail with NXDOMAIN, except A queries covered by a wildcard.
#[derive(Default)]
pub struct FakeDns {
    records: HashMap<(String, RecordType), Vec<RecordData>>,
    ptr: HashMap<Ipv4Addr, String>,
    wildcard: Option<(String, Ipv4Addr)>,
    calls: CallLog,
}

#[allow(dead_code)] // Not every test file uses every helper
impl FakeDns {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_a(mut self, name: &str, ips: &[Ipv4Addr]) -> Self {
        let data = ips.iter().map(|ip| RecordData::A(*ip)).collect();
        self.records.insert((name.to_string(), RecordType::A), data);
        self
    }

    pub fn with_ns(mut self, zone: &str, hosts: &[&str]) -> Self {
        let data = hosts.iter().map(|h| RecordData::Ns(h.to_string())).collect();
        self.records.insert((zone.to_string(), RecordType::NS), data);
        self
    }

    pub fn with_soa(mut self, zone: &str, mname: &str) -> Self {
        let data = vec![RecordData::Soa {
            mname: mname.to_string(),
            rname: format!("hostmaster.{zone}"),
            serial: 2024010101,
        }];
        self.records.insert((zone.to_string(), RecordType::SOA), data);
        self
    }

    pub fn with_ptr(mut self, ip: Ipv4Addr, host: &str) -> Self {
        self.ptr.insert(ip, host.to_string());
        self
    }

    /// Answers every unknown A query under `zone` with `ip`.
    pub fn with_wildcard(mut self, zone: &str, ip: Ipv4Addr) -> Self {
        self.wildcard = Some((zone.to_string(), ip));
        self
    }

    /// Handle to the query log, usable after the resolver is boxed.
    pub fn call_log(&self) -> CallLog {
        Arc::clone(&self.calls)
    }

    fn find(&self, key: &str, record_type: RecordType) -> Option<Vec<RecordData>> {
        if let Some(data) = self.records.get(&(key.to_string(), record_type)) {
            return Some(data.clone());
        }
        match (&self.wildcard, record_type) {
            (Some((zone, ip)), RecordType::A) if key.ends_with(&format!(".{zone}")) => {
                Some(vec![RecordData::A(*ip)])
            }
            _ => None,
        }
    }
}

#[async_trait]
impl DnsResolver for FakeDns {
    async fn lookup(
        &self,
        name: &DomainName,
        record_type: RecordType,
    ) -> Result<Answer, QueryError> {
        let key = name.to_string();
        self.calls.lock().unwrap().push((key.clone(), record_type));
        match self.find(&key, record_type) {
            Some(data) => {
                let records = data
                    .into_iter()
                    .map(|d| ResourceRecord::new(key.clone(), 300, d))
                    .collect();
                Ok(Answer::new(name.clone(), record_type, records))
            }
            None => Err(QueryError::new(key, record_type, QueryFailure::NxDomain, "NXDOMAIN")),
        }
    }

    async fn reverse_lookup(&self, ip: Ipv4Addr) -> Result<ReverseAnswer, QueryError> {
        match self.ptr.get(&ip) {
            Some(host) => Ok(ReverseAnswer::new(ip, vec![host.clone()])),
            None => Err(QueryError::new(
                ip.to_string(),
                RecordType::PTR,
                QueryFailure::NxDomain,
                "NXDOMAIN",
            )),
        }
    }
}

/// Zone transport that serves zones only from chosen nameservers.
#[derive(Default)]
pub struct FakeTransport {
    zones: HashMap<IpAddr, ZoneData>,
}

#[allow(dead_code)]
impl FakeTransport {
    /// A transport that refuses every transfer.
    pub fn refusing() -> Self {
        Self::default()
    }

    pub fn serving(nameserver: Ipv4Addr, zone: ZoneData) -> Self {
        let mut zones = HashMap::new();
        zones.insert(IpAddr::V4(nameserver), zone);
        Self { zones }
    }
}

#[async_trait]
impl ZoneTransport for FakeTransport {
    async fn transfer(
        &self,
        nameserver: IpAddr,
        domain: &DomainName,
    ) -> Result<ZoneData, TransferError> {
        self.zones.get(&nameserver).cloned().ok_or_else(|| {
            TransferError::new(
                domain.to_string(),
                nameserver.to_string(),
                TransferFailure::Refused,
                "REFUSED",
            )
        })
    }
}

pub fn name(text: &str) -> DomainName {
    DomainName::parse(text).expect("valid test domain")
}

/// A resolver for `example.com.` with NS, SOA and a primary address.
#[allow(dead_code)]
pub fn example_zone() -> FakeDns {
    FakeDns::new()
        .with_ns("example.com.", &["ns1.example.com.", "ns2.example.com."])
        .with_soa("example.com.", "ns1.example.com.")
        .with_a("ns1.example.com.", &[Ipv4Addr::new(192, 0, 2, 53)])
}
