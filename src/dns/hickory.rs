//! hickory-resolver bindings for the resolution engine.
//!
//! [`HickoryResolver`] answers forward and reverse queries through a shared
//! `TokioResolver`. [`HickoryZoneTransport`] runs AXFR itself over a TCP
//! stream, since the resolver's lookup path drops transfer answers.

use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use hickory_resolver::proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_resolver::proto::rr::{Name, RData, Record, RecordType as WireRecordType};
use hickory_resolver::proto::{ProtoError, ProtoErrorKind};
use hickory_resolver::{ResolveError, ResolveErrorKind, TokioResolver};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use super::records::{Answer, RecordData, RecordType, ResourceRecord, ReverseAnswer, ZoneData};
use super::resolution::DnsResolver;
use super::zone::ZoneTransport;
use crate::config::DNS_PORT;
use crate::domain::DomainName;
use crate::error_handling::{QueryError, QueryFailure, TransferError, TransferFailure};

/// Resolver handle backed by `hickory_resolver::TokioResolver`.
pub struct HickoryResolver {
    inner: TokioResolver,
}

impl HickoryResolver {
    /// Wraps an already configured resolver.
    pub fn new(inner: TokioResolver) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl DnsResolver for HickoryResolver {
    async fn lookup(
        &self,
        name: &DomainName,
        record_type: RecordType,
    ) -> Result<Answer, QueryError> {
        let wire_name = to_wire_name(name).map_err(|e| {
            QueryError::new(name.to_string(), record_type, QueryFailure::Other, e)
        })?;
        match self.inner.lookup(wire_name, to_wire_type(record_type)).await {
            Ok(lookup) => {
                let records: Vec<ResourceRecord> =
                    lookup.record_iter().map(convert_record).collect();
                if records.is_empty() {
                    return Err(QueryError::new(
                        name.to_string(),
                        record_type,
                        QueryFailure::NoAnswer,
                        "empty answer",
                    ));
                }
                Ok(Answer::new(name.clone(), record_type, records))
            }
            Err(e) => Err(QueryError::new(
                name.to_string(),
                record_type,
                classify_query_error(&e),
                e.to_string(),
            )),
        }
    }

    async fn reverse_lookup(&self, ip: Ipv4Addr) -> Result<ReverseAnswer, QueryError> {
        match self.inner.reverse_lookup(IpAddr::V4(ip)).await {
            Ok(response) => {
                let hostnames = response.iter().map(|name| name.to_utf8()).collect();
                Ok(ReverseAnswer::new(ip, hostnames))
            }
            Err(e) => Err(QueryError::new(
                ip.to_string(),
                RecordType::PTR,
                classify_query_error(&e),
                e.to_string(),
            )),
        }
    }
}

/// Zone transfer transport speaking AXFR over TCP.
///
/// Each attempt opens one connection, sends a single AXFR query framed with
/// hickory's wire codec and reads length-prefixed responses until the
/// closing SOA.
pub struct HickoryZoneTransport {
    timeout: Duration,
    port: u16,
}

impl HickoryZoneTransport {
    /// Creates a transport with the given per-transfer timeout.
    pub fn new(timeout: Duration) -> Self {
        Self::with_port(timeout, DNS_PORT)
    }

    /// Creates a transport that contacts nameservers on `port` instead of 53.
    pub fn with_port(timeout: Duration, port: u16) -> Self {
        Self { timeout, port }
    }
}

#[async_trait]
impl ZoneTransport for HickoryZoneTransport {
    async fn transfer(
        &self,
        nameserver: IpAddr,
        domain: &DomainName,
    ) -> Result<ZoneData, TransferError> {
        let zone = domain.to_absolute();
        let wire_name = to_wire_name(&zone).map_err(|e| {
            TransferError::new(
                zone.to_string(),
                nameserver.to_string(),
                TransferFailure::Other,
                e,
            )
        })?;

        let addr = SocketAddr::new(nameserver, self.port);
        let outcome = match tokio::time::timeout(self.timeout, axfr(addr, wire_name)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(XfrFailure(
                TransferFailure::Timeout,
                format!("no complete transfer within {:?}", self.timeout),
            )),
        };
        match outcome {
            Ok(records) => Ok(ZoneData::new(zone, records)),
            Err(XfrFailure(failure, detail)) => Err(TransferError::new(
                zone.to_string(),
                nameserver.to_string(),
                failure,
                detail,
            )),
        }
    }
}

/// Failure of a single AXFR exchange, before it is tied to a zone.
#[derive(Debug)]
struct XfrFailure(TransferFailure, String);

impl From<io::Error> for XfrFailure {
    fn from(err: io::Error) -> Self {
        XfrFailure(classify_io_error(err.kind()), err.to_string())
    }
}

impl From<ProtoError> for XfrFailure {
    fn from(err: ProtoError) -> Self {
        XfrFailure(TransferFailure::Malformed, err.to_string())
    }
}

/// Runs one AXFR exchange against `addr`.
///
/// Records are returned in transfer order, starting with the zone's SOA. The
/// repeated SOA that closes the transfer is not included.
async fn axfr(addr: SocketAddr, zone: Name) -> Result<Vec<ResourceRecord>, XfrFailure> {
    let mut stream = TcpStream::connect(addr).await?;
    let id: u16 = rand::random();
    send_message(&mut stream, &axfr_request(id, zone)).await?;

    let mut records = Vec::new();
    loop {
        let response = read_message(&mut stream).await?;
        if response.id() != id {
            return Err(XfrFailure(
                TransferFailure::Malformed,
                format!("response id {} does not match query id {id}", response.id()),
            ));
        }
        match response.response_code() {
            ResponseCode::NoError => {}
            ResponseCode::FormErr => {
                return Err(XfrFailure(TransferFailure::Malformed, "FORMERR".to_string()));
            }
            code => return Err(XfrFailure(TransferFailure::Refused, format!("{code:?}"))),
        }
        if records.is_empty() && response.answers().is_empty() {
            return Err(XfrFailure(
                TransferFailure::Refused,
                "no records transferred".to_string(),
            ));
        }

        for record in response.answers() {
            let is_soa = record.record_type() == WireRecordType::SOA;
            if records.is_empty() && !is_soa {
                return Err(XfrFailure(
                    TransferFailure::Malformed,
                    "transfer does not start with SOA".to_string(),
                ));
            }
            if is_soa && !records.is_empty() {
                return Ok(records);
            }
            records.push(convert_record(record));
        }
    }
}

fn axfr_request(id: u16, zone: Name) -> Message {
    let mut message = Message::new();
    message
        .set_id(id)
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(false)
        .add_query(Query::query(zone, WireRecordType::AXFR));
    message
}

/// Writes one DNS message with its two-byte TCP length prefix.
async fn send_message(stream: &mut TcpStream, message: &Message) -> Result<(), XfrFailure> {
    let bytes = message.to_vec()?;
    let len = u16::try_from(bytes.len()).map_err(|_| {
        XfrFailure(TransferFailure::Other, "message exceeds 65535 bytes".to_string())
    })?;
    let mut frame = Vec::with_capacity(bytes.len() + 2);
    frame.extend_from_slice(&len.to_be_bytes());
    frame.extend_from_slice(&bytes);
    stream.write_all(&frame).await?;
    Ok(())
}

/// Reads one length-prefixed DNS message.
async fn read_message(stream: &mut TcpStream) -> Result<Message, XfrFailure> {
    let len = stream.read_u16().await?;
    let mut buf = vec![0u8; usize::from(len)];
    stream.read_exact(&mut buf).await?;
    Ok(Message::from_vec(&buf)?)
}

fn to_wire_name(name: &DomainName) -> Result<Name, String> {
    if name.is_root() {
        return Ok(Name::root());
    }
    Name::from_ascii(name.to_absolute().to_string()).map_err(|e| e.to_string())
}

fn to_wire_type(record_type: RecordType) -> WireRecordType {
    match record_type {
        RecordType::A => WireRecordType::A,
        RecordType::Aaaa => WireRecordType::AAAA,
        RecordType::NS => WireRecordType::NS,
        RecordType::SOA => WireRecordType::SOA,
        RecordType::PTR => WireRecordType::PTR,
        RecordType::CNAME => WireRecordType::CNAME,
        RecordType::MX => WireRecordType::MX,
        RecordType::TXT => WireRecordType::TXT,
        RecordType::AXFR => WireRecordType::AXFR,
    }
}

fn convert_record(record: &Record) -> ResourceRecord {
    ResourceRecord::new(record.name().to_utf8(), record.ttl(), convert_rdata(record.data()))
}

fn convert_rdata(rdata: &RData) -> RecordData {
    match rdata {
        RData::A(a) => RecordData::A(a.0),
        RData::AAAA(aaaa) => RecordData::Aaaa(aaaa.0),
        RData::NS(ns) => RecordData::Ns(ns.0.to_utf8()),
        RData::SOA(soa) => RecordData::Soa {
            mname: soa.mname().to_utf8(),
            rname: soa.rname().to_utf8(),
            serial: soa.serial(),
        },
        RData::PTR(ptr) => RecordData::Ptr(ptr.0.to_utf8()),
        RData::CNAME(cname) => RecordData::Cname(cname.0.to_utf8()),
        RData::MX(mx) => RecordData::Mx {
            preference: mx.preference(),
            exchange: mx.exchange().to_utf8(),
        },
        RData::TXT(txt) => RecordData::Txt(
            txt.iter()
                .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
                .collect::<Vec<_>>()
                .join(""),
        ),
        other => RecordData::Other {
            record_type: other.record_type().to_string(),
            text: other.to_string(),
        },
    }
}

/// Maps a hickory resolution error onto the engine's query classification.
pub(crate) fn classify_query_error(err: &ResolveError) -> QueryFailure {
    let ResolveErrorKind::Proto(proto) = err.kind() else {
        return QueryFailure::Other;
    };
    match proto.kind() {
        ProtoErrorKind::NoRecordsFound { response_code, .. } => {
            classify_response_code(*response_code)
        }
        ProtoErrorKind::Timeout => QueryFailure::Timeout,
        ProtoErrorKind::NoConnections => QueryFailure::NoNameservers,
        ProtoErrorKind::Io(io_err) if io_err.kind() == io::ErrorKind::TimedOut => {
            QueryFailure::Timeout
        }
        ProtoErrorKind::Io(_) => QueryFailure::NoNameservers,
        _ => QueryFailure::Other,
    }
}

pub(crate) fn classify_response_code(code: ResponseCode) -> QueryFailure {
    match code {
        ResponseCode::NXDomain => QueryFailure::NxDomain,
        ResponseCode::ServFail | ResponseCode::Refused | ResponseCode::NotAuth => {
            QueryFailure::NoNameservers
        }
        ResponseCode::NoError => QueryFailure::NoAnswer,
        _ => QueryFailure::Other,
    }
}

pub(crate) fn classify_io_error(kind: io::ErrorKind) -> TransferFailure {
    match kind {
        io::ErrorKind::UnexpectedEof => TransferFailure::Eof,
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => TransferFailure::Timeout,
        io::ErrorKind::InvalidData => TransferFailure::Malformed,
        _ => TransferFailure::Connection,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns::zone_transfer;
    use hickory_resolver::proto::rr::rdata::{NS, SOA};
    use tokio::net::TcpListener;

    fn wire(text: &str) -> Name {
        Name::from_ascii(text).unwrap()
    }

    fn soa_record() -> Record {
        let soa = SOA::new(
            wire("ns1.example.com."),
            wire("hostmaster.example.com."),
            2024010101,
            7200,
            3600,
            1209600,
            300,
        );
        Record::from_rdata(wire("example.com."), 3600, RData::SOA(soa))
    }

    fn a_record(owner: &str, ip: Ipv4Addr) -> Record {
        Record::from_rdata(wire(owner), 3600, RData::A(ip.into()))
    }

    /// Serves one AXFR connection, answering with one message per entry of
    /// `responses`. Returns the listening port.
    async fn serve_transfer(responses: Vec<Vec<Record>>, code: ResponseCode) -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let request = read_message(&mut stream).await.unwrap();
            assert_eq!(request.queries()[0].query_type(), WireRecordType::AXFR);
            for answers in responses {
                let mut response = Message::new();
                response
                    .set_id(request.id())
                    .set_message_type(MessageType::Response)
                    .set_op_code(OpCode::Query)
                    .set_response_code(code)
                    .add_queries(request.queries().to_vec())
                    .add_answers(answers);
                send_message(&mut stream, &response).await.unwrap();
            }
        });
        port
    }

    fn transport(port: u16) -> HickoryZoneTransport {
        HickoryZoneTransport::with_port(Duration::from_secs(3), port)
    }

    fn localhost() -> IpAddr {
        IpAddr::V4(Ipv4Addr::LOCALHOST)
    }

    fn example() -> DomainName {
        DomainName::parse("example.com.").unwrap()
    }

    #[tokio::test]
    async fn test_transfer_spanning_messages() {
        let ns = Record::from_rdata(
            wire("example.com."),
            3600,
            RData::NS(NS(wire("ns1.example.com."))),
        );
        let port = serve_transfer(
            vec![
                vec![
                    soa_record(),
                    ns,
                    a_record("www.example.com.", Ipv4Addr::new(192, 0, 2, 10)),
                ],
                vec![
                    a_record("mail.example.com.", Ipv4Addr::new(192, 0, 2, 25)),
                    soa_record(),
                ],
            ],
            ResponseCode::NoError,
        )
        .await;

        let zone = zone_transfer(&transport(port), localhost(), &example())
            .await
            .unwrap()
            .expect("zone should transfer");

        assert_eq!(zone.origin, example());
        assert_eq!(
            zone.to_string(),
            "example.com. 3600 IN SOA ns1.example.com. hostmaster.example.com. 2024010101\n\
             example.com. 3600 IN NS ns1.example.com.\n\
             www.example.com. 3600 IN A 192.0.2.10\n\
             mail.example.com. 3600 IN A 192.0.2.25\n"
        );
    }

    #[tokio::test]
    async fn test_transfer_single_message() {
        let port = serve_transfer(
            vec![vec![
                soa_record(),
                a_record("www.example.com.", Ipv4Addr::new(192, 0, 2, 10)),
                soa_record(),
            ]],
            ResponseCode::NoError,
        )
        .await;

        let zone = transport(port).transfer(localhost(), &example()).await.unwrap();
        assert_eq!(zone.len(), 2);
        assert_eq!(zone.records[1].data, RecordData::A(Ipv4Addr::new(192, 0, 2, 10)));
    }

    #[tokio::test]
    async fn test_transfer_refused_by_server() {
        let port = serve_transfer(vec![Vec::new()], ResponseCode::Refused).await;

        let err = transport(port).transfer(localhost(), &example()).await.unwrap_err();
        assert_eq!(err.failure, TransferFailure::Refused);

        let port = serve_transfer(vec![Vec::new()], ResponseCode::NotAuth).await;
        let result = zone_transfer(&transport(port), localhost(), &example()).await;
        assert_eq!(result, Ok(None));
    }

    #[tokio::test]
    async fn test_transfer_empty_answer_is_refused() {
        let port = serve_transfer(vec![Vec::new()], ResponseCode::NoError).await;

        let err = transport(port).transfer(localhost(), &example()).await.unwrap_err();
        assert_eq!(err.failure, TransferFailure::Refused);
    }

    #[tokio::test]
    async fn test_transfer_cut_short_is_eof() {
        // Server closes the stream before the closing SOA
        let port = serve_transfer(
            vec![vec![
                soa_record(),
                a_record("www.example.com.", Ipv4Addr::new(192, 0, 2, 10)),
            ]],
            ResponseCode::NoError,
        )
        .await;

        let err = transport(port).transfer(localhost(), &example()).await.unwrap_err();
        assert_eq!(err.failure, TransferFailure::Eof);
    }

    #[tokio::test]
    async fn test_transfer_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let err = transport(port).transfer(localhost(), &example()).await.unwrap_err();
        assert_eq!(err.failure, TransferFailure::Connection);
        assert!(err.is_unavailable());
    }

    #[tokio::test]
    async fn test_transfer_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            let (_stream, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let transport = HickoryZoneTransport::with_port(Duration::from_millis(100), port);
        let err = transport.transfer(localhost(), &example()).await.unwrap_err();
        assert_eq!(err.failure, TransferFailure::Timeout);
    }

    #[test]
    fn test_classify_response_codes() {
        assert_eq!(
            classify_response_code(ResponseCode::NXDomain),
            QueryFailure::NxDomain
        );
        assert_eq!(
            classify_response_code(ResponseCode::ServFail),
            QueryFailure::NoNameservers
        );
        assert_eq!(
            classify_response_code(ResponseCode::Refused),
            QueryFailure::NoNameservers
        );
        assert_eq!(
            classify_response_code(ResponseCode::NoError),
            QueryFailure::NoAnswer
        );
        assert_eq!(
            classify_response_code(ResponseCode::FormErr),
            QueryFailure::Other
        );
    }

    #[test]
    fn test_classify_io_errors() {
        assert_eq!(
            classify_io_error(io::ErrorKind::ConnectionRefused),
            TransferFailure::Connection
        );
        assert_eq!(
            classify_io_error(io::ErrorKind::ConnectionReset),
            TransferFailure::Connection
        );
        assert_eq!(
            classify_io_error(io::ErrorKind::UnexpectedEof),
            TransferFailure::Eof
        );
        assert_eq!(
            classify_io_error(io::ErrorKind::TimedOut),
            TransferFailure::Timeout
        );
        assert_eq!(
            classify_io_error(io::ErrorKind::InvalidData),
            TransferFailure::Malformed
        );
    }

    #[test]
    fn test_wire_name_conversion() {
        let name = DomainName::parse("www.example.com").unwrap();
        assert_eq!(to_wire_name(&name).unwrap().to_utf8(), "www.example.com.");
        assert!(to_wire_name(&DomainName::root()).unwrap().is_root());
    }

    #[test]
    fn test_wire_type_conversion() {
        assert_eq!(to_wire_type(RecordType::NS), WireRecordType::NS);
        assert_eq!(to_wire_type(RecordType::Aaaa), WireRecordType::AAAA);
        assert_eq!(to_wire_type(RecordType::AXFR), WireRecordType::AXFR);
    }

    #[test]
    fn test_convert_rdata_address() {
        let ip = Ipv4Addr::new(192, 0, 2, 1);
        let rdata = RData::A(ip.into());
        assert_eq!(convert_rdata(&rdata), RecordData::A(ip));
    }
}
