//! Scan result output.
//!
//! Every function writes plain text lines to any `std::io::Write`, so results
//! can be piped or captured in tests. Mappings (nearby hosts, HTTP headers)
//! are rendered as `{'key': 'value', ...}`, broken one entry per line when
//! they do not fit on a single line.

use std::io::{self, Write};
use std::net::Ipv4Addr;

use crate::config::REPORT_LINE_WIDTH;
use crate::dns::ZoneData;
use crate::domain::DomainName;
use crate::nearby::NearbyMap;

/// Prints the nameserver line: `NS: a. b.` or `NS: failure`.
pub fn print_nameservers<W: Write>(out: &mut W, nameservers: Option<&[String]>) -> io::Result<()> {
    match nameservers {
        Some(names) if !names.is_empty() => writeln!(out, "NS: {}", names.join(" ")),
        _ => writeln!(out, "NS: failure"),
    }
}

/// Prints the SOA line: `SOA: mname (ip)` or `SOA: failure`.
///
/// A primary whose address could not be resolved prints as `(unresolved)`.
pub fn print_soa<W: Write>(
    out: &mut W,
    soa: Option<(&DomainName, Option<Ipv4Addr>)>,
) -> io::Result<()> {
    match soa {
        Some((mname, Some(ip))) => writeln!(out, "SOA: {mname} ({ip})"),
        Some((mname, None)) => writeln!(out, "SOA: {mname} (unresolved)"),
        None => writeln!(out, "SOA: failure"),
    }
}

/// Prints the zone transfer outcome, followed by the records on success.
pub fn print_zone<W: Write>(out: &mut W, zone: Option<&ZoneData>) -> io::Result<()> {
    match zone {
        Some(zone) => {
            writeln!(out, "Zone: success")?;
            write!(out, "{zone}")
        }
        None => writeln!(out, "Zone: failure"),
    }
}

/// Prints the wildcard line: `Wildcard: a, b` or `Wildcard: failure`.
pub fn print_wildcard<W: Write>(out: &mut W, wildcard: Option<&[Ipv4Addr]>) -> io::Result<()> {
    match wildcard {
        Some(ips) if !ips.is_empty() => {
            let ips: Vec<String> = ips.iter().map(Ipv4Addr::to_string).collect();
            writeln!(out, "Wildcard: {}", ips.join(", "))
        }
        _ => writeln!(out, "Wildcard: failure"),
    }
}

/// Prints one discovered subdomain.
///
/// `Found: {url} ({ip})`, then the HTTP headers and the nearby hosts, each
/// only when present and non-empty.
///
/// # Arguments
///
/// * `out` - Destination
/// * `url` - The subdomain that resolved
/// * `ip` - Its address
/// * `http_headers` - Headers from the connection probe, if one was made
/// * `nearby` - Reverse lookups around `ip`
pub fn print_subdomain_result<W: Write>(
    out: &mut W,
    url: &DomainName,
    ip: Ipv4Addr,
    http_headers: Option<&[(String, String)]>,
    nearby: Option<&NearbyMap>,
) -> io::Result<()> {
    writeln!(out, "Found: {url} ({ip})")?;
    if let Some(headers) = http_headers.filter(|h| !h.is_empty()) {
        writeln!(out, "HTTP connected:")?;
        writeln!(
            out,
            "{}",
            format_mapping(headers.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        )?;
    }
    if let Some(nearby) = nearby {
        print_nearby(out, nearby)?;
    }
    Ok(())
}

/// Prints `Nearby:` and the map, or nothing for an empty map.
pub fn print_nearby<W: Write>(out: &mut W, nearby: &NearbyMap) -> io::Result<()> {
    if nearby.is_empty() {
        return Ok(());
    }
    writeln!(out, "Nearby:")?;
    writeln!(out, "{}", format_mapping(nearby.hostnames()))
}

/// Renders key/value pairs as a quoted mapping.
///
/// Pairs keep their order. Output longer than the report width is split with
/// one pair per line, continuation lines indented by one space.
pub fn format_mapping<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let pairs: Vec<String> = entries
        .into_iter()
        .map(|(key, value)| format!("{}: {}", quote(key), quote(value)))
        .collect();

    let single = format!("{{{}}}", pairs.join(", "));
    if single.len() <= REPORT_LINE_WIDTH {
        return single;
    }
    format!("{{{}}}", pairs.join(",\n "))
}

/// Quotes a string with single quotes, or double quotes when it contains
/// only single ones.
fn quote(text: &str) -> String {
    let delimiter = if text.contains('\'') && !text.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push(delimiter);
    for c in text.chars() {
        if c == '\\' || c == delimiter {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push(delimiter);
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns::{RecordData, ResourceRecord, ReverseAnswer};

    fn render<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(f: F) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn nearby(entries: &[(&str, &str)]) -> NearbyMap {
        let mut map = NearbyMap::new();
        for (ip, host) in entries {
            map.insert(
                ip.to_string(),
                ReverseAnswer::new(ip.parse().unwrap(), vec![host.to_string()]),
            );
        }
        map
    }

    fn name(text: &str) -> DomainName {
        DomainName::parse(text).unwrap()
    }

    #[test]
    fn test_print_subdomain_result_basic() {
        let output = render(|out| {
            print_subdomain_result(
                out,
                &name("example.com."),
                Ipv4Addr::new(192, 168, 1, 1),
                None,
                None,
            )
        });
        assert_eq!(output, "Found: example.com. (192.168.1.1)\n");
    }

    #[test]
    fn test_print_subdomain_result_both() {
        let headers = vec![("HTTP HEADER".to_string(), "value".to_string())];
        let nearby = nearby(&[("192.168.1.0", "nearby.com.")]);
        let output = render(|out| {
            print_subdomain_result(
                out,
                &name("example.com."),
                Ipv4Addr::new(192, 168, 1, 1),
                Some(headers.as_slice()),
                Some(&nearby),
            )
        });
        let expected = "Found: example.com. (192.168.1.1)\n\
                        HTTP connected:\n\
                        {'HTTP HEADER': 'value'}\n\
                        Nearby:\n\
                        {'192.168.1.0': 'nearby.com.'}\n";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_print_subdomain_result_nearby_only() {
        let nearby = nearby(&[("192.168.1.0", "nearby.com.")]);
        let output = render(|out| {
            print_subdomain_result(
                out,
                &name("example.com."),
                Ipv4Addr::new(192, 168, 1, 1),
                Some(&[][..]),
                Some(&nearby),
            )
        });
        assert_eq!(
            output,
            "Found: example.com. (192.168.1.1)\nNearby:\n{'192.168.1.0': 'nearby.com.'}\n"
        );
    }

    #[test]
    fn test_print_subdomain_result_empty_nearby_omitted() {
        let output = render(|out| {
            print_subdomain_result(
                out,
                &name("example.com."),
                Ipv4Addr::new(192, 168, 1, 1),
                None,
                Some(&NearbyMap::new()),
            )
        });
        assert_eq!(output, "Found: example.com. (192.168.1.1)\n");
    }

    #[test]
    fn test_format_mapping_wraps_long_output() {
        let map = nearby(&[
            ("192.168.1.0", "first-host.internal.example.com."),
            ("192.168.1.1", "second-host.internal.example.com."),
        ]);
        let expected = "{'192.168.1.0': 'first-host.internal.example.com.',\n \
                        '192.168.1.1': 'second-host.internal.example.com.'}";
        assert_eq!(format_mapping(map.hostnames()), expected);
    }

    #[test]
    fn test_format_mapping_quoting() {
        assert_eq!(format_mapping(Vec::new()), "{}");
        assert_eq!(format_mapping([("k", "it's")]), "{'k': \"it's\"}");
        assert_eq!(format_mapping([("k", "a\\b")]), "{'k': 'a\\\\b'}");
        assert_eq!(format_mapping([("k", "'\"")]), "{'k': '\\'\"'}");
    }

    #[test]
    fn test_print_nameservers() {
        let ns = vec!["ns1.example.com.".to_string(), "ns2.example.com.".to_string()];
        assert_eq!(
            render(|out| print_nameservers(out, Some(ns.as_slice()))),
            "NS: ns1.example.com. ns2.example.com.\n"
        );
        assert_eq!(render(|out| print_nameservers(out, None)), "NS: failure\n");
        assert_eq!(render(|out| print_nameservers(out, Some(&[][..]))), "NS: failure\n");
    }

    #[test]
    fn test_print_soa() {
        let mname = name("ns1.example.com.");
        assert_eq!(
            render(|out| print_soa(out, Some((&mname, Some(Ipv4Addr::new(192, 0, 2, 53)))))),
            "SOA: ns1.example.com. (192.0.2.53)\n"
        );
        assert_eq!(
            render(|out| print_soa(out, Some((&mname, None)))),
            "SOA: ns1.example.com. (unresolved)\n"
        );
        assert_eq!(render(|out| print_soa(out, None)), "SOA: failure\n");
    }

    #[test]
    fn test_print_zone() {
        let zone = ZoneData::new(
            name("example.com."),
            vec![ResourceRecord::new(
                "www.example.com.",
                300,
                RecordData::A(Ipv4Addr::new(192, 0, 2, 10)),
            )],
        );
        assert_eq!(
            render(|out| print_zone(out, Some(&zone))),
            "Zone: success\nwww.example.com. 300 IN A 192.0.2.10\n"
        );
        assert_eq!(render(|out| print_zone(out, None)), "Zone: failure\n");
    }

    #[test]
    fn test_print_wildcard() {
        let ips = [Ipv4Addr::new(192, 0, 2, 1), Ipv4Addr::new(192, 0, 2, 2)];
        assert_eq!(
            render(|out| print_wildcard(out, Some(&ips[..]))),
            "Wildcard: 192.0.2.1, 192.0.2.2\n"
        );
        assert_eq!(render(|out| print_wildcard(out, None)), "Wildcard: failure\n");
    }
}
